use envmap_prefilter::cubemap::{CubeFace, CUBE_FACES};
use envmap_prefilter::types::{FaceInput, FacePixels, FaceSlice, PixelFormat};
use envmap_prefilter::{CubePrefilter, PrefilterParams};

use serde::Deserialize;
use std::env;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let program = env::args()
        .next()
        .unwrap_or_else(|| "envmap_prefilter".to_string());
    let config = parse_args(&program)?;

    let input_set = FacePathSet::from_one(&config.input_path).ok_or_else(|| {
        format!(
            "Input '{}' must be one of the six faces (posx/negx/posy/negy/posz/negz)",
            config.input_path.display()
        )
    })?;

    let mut size = 0usize;
    let mut face_data: Vec<Vec<u8>> = Vec::with_capacity(6);
    for path in input_set.paths() {
        let img = image::open(&path)
            .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
            .to_rgba8();
        let (w, h) = (img.width() as usize, img.height() as usize);
        if w != h {
            return Err(format!("{} is not square ({w}×{h})", path.display()));
        }
        if size == 0 {
            size = w;
        } else if w != size {
            return Err(format!(
                "{} is {w}×{h}, but other faces are {size}×{size}",
                path.display()
            ));
        }
        face_data.push(img.into_raw());
    }

    let mut params = PrefilterParams::new(size, config.sigmas.clone());
    if let Some(min) = config.min_passes {
        params = params.with_min_num_passes(min);
    }
    if let Some(path) = &config.config_path {
        let file = load_config(path)?;
        params.mip_level_sigmas = file.mip_level_sigmas;
        if let Some(v) = file.min_num_passes {
            params.min_num_passes = v;
        }
        if let Some(v) = file.kernel_resolution {
            params.kernel_resolution = v;
        }
        if let Some(v) = file.kernel_width {
            params.kernel_width = v;
        }
    }

    let prefilter = CubePrefilter::new(params).map_err(|e| e.to_string())?;
    let faces: Vec<FaceInput> = face_data
        .iter()
        .map(|data| FaceInput {
            format: PixelFormat::Rgba8Srgb,
            data: FaceSlice::U8(data),
        })
        .collect();
    let chain = prefilter
        .process(&faces, PixelFormat::Rgba8Srgb)
        .map_err(|e| e.to_string())?;

    fs::create_dir_all(&config.output_dir)
        .map_err(|e| format!("Failed to create {}: {e}", config.output_dir.display()))?;
    for (level_index, level) in chain.iter().enumerate() {
        for (face, encoded) in CUBE_FACES.iter().zip(&level.faces) {
            let pixels = match &encoded.pixels {
                FacePixels::U8(v) => v.clone(),
                other => return Err(format!("Unexpected output pixels {other:?}")),
            };
            let img = image::RgbaImage::from_raw(level.size as u32, level.size as u32, pixels)
                .ok_or_else(|| "Output buffer has the wrong length".to_string())?;
            let path = config
                .output_dir
                .join(format!("{}_l{level_index}.png", face_stem(*face)));
            img.save(&path)
                .map_err(|e| format!("Failed to save {}: {e}", path.display()))?;
        }
        println!("level {level_index}: {0}×{0} written", level.size);
    }

    Ok(())
}

/// Locates the six face files `posx.EXT` … `negz.EXT` next to any one of
/// them.
struct FacePathSet {
    base: PathBuf,
    ext: OsString,
}

impl FacePathSet {
    fn from_one(name: &Path) -> Option<Self> {
        let stem = name.file_stem()?;
        if CUBE_FACES.iter().all(|f| stem != OsStr::new(face_stem(*f))) {
            return None;
        }
        Some(Self {
            base: name.parent().unwrap_or(Path::new("")).to_owned(),
            ext: match name.extension() {
                Some(ext) => {
                    let mut s = OsString::from(".");
                    s.push(ext);
                    s
                }
                None => OsString::new(),
            },
        })
    }

    fn path(&self, face: CubeFace) -> PathBuf {
        let mut name = OsString::from(face_stem(face));
        name.push(&self.ext);
        self.base.join(name)
    }

    fn paths(&self) -> [PathBuf; 6] {
        CUBE_FACES.map(|f| self.path(f))
    }
}

fn face_stem(face: CubeFace) -> &'static str {
    match face {
        CubeFace::PositiveX => "posx",
        CubeFace::NegativeX => "negx",
        CubeFace::PositiveY => "posy",
        CubeFace::NegativeY => "negy",
        CubeFace::PositiveZ => "posz",
        CubeFace::NegativeZ => "negz",
    }
}

#[derive(Clone, Deserialize)]
struct RunConfig {
    mip_level_sigmas: Vec<f32>,
    #[serde(default)]
    min_num_passes: Option<usize>,
    #[serde(default)]
    kernel_resolution: Option<f32>,
    #[serde(default)]
    kernel_width: Option<f32>,
}

fn load_config(path: &Path) -> Result<RunConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: RunConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    Ok(config)
}

struct CliConfig {
    input_path: PathBuf,
    output_dir: PathBuf,
    sigmas: Vec<f32>,
    min_passes: Option<usize>,
    config_path: Option<PathBuf>,
}

fn parse_args(program: &str) -> Result<CliConfig, String> {
    let mut args = env::args().skip(1);
    let mut positional: Vec<PathBuf> = Vec::new();
    let mut sigmas: Vec<f32> = vec![0.02, 0.05, 0.1];
    let mut min_passes: Option<usize> = None;
    let mut config_path: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                println!("{}", usage(program));
                std::process::exit(0);
            }
            "--sigmas" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--sigmas expects a comma-separated list\n{}", usage(program)))?;
                sigmas = parse_sigmas(&value)?;
            }
            "--min-passes" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--min-passes expects a value\n{}", usage(program)))?;
                let parsed: usize = value
                    .parse()
                    .map_err(|_| format!("Invalid pass count '{value}'"))?;
                min_passes = Some(parsed);
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--config expects a path\n{}", usage(program)))?;
                config_path = Some(PathBuf::from(value));
            }
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown option '{arg}'\n{}", usage(program)));
            }
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    if positional.len() != 2 {
        return Err(usage(program));
    }
    let output_dir = positional.pop().expect("two positionals");
    let input_path = positional.pop().expect("one positional");
    Ok(CliConfig {
        input_path,
        output_dir,
        sigmas,
        min_passes,
        config_path,
    })
}

fn parse_sigmas(value: &str) -> Result<Vec<f32>, String> {
    value
        .split(',')
        .map(|s| {
            s.trim()
                .parse::<f32>()
                .map_err(|_| format!("Invalid sigma '{s}'"))
        })
        .collect()
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} <face.png> <outdir> [--sigmas s0,s1,...] [--min-passes n] [--config run.json]\n\n\
Prefilters a cube map stored as six files posx.EXT ... negz.EXT (pass any one\n\
of them) and writes one set of face images per mip level into <outdir>.\n\
Examples:\n  {program} sky/posx.png sky_mips --sigmas 0.02,0.05,0.1\n  {program} sky/posx.png sky_mips --config run.json\n"
    )
}
