pub mod synthetic_cubemap;
