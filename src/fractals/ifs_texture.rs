use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::core::{
    file_io::FilePrefix,
    image_utils::{clamp_color, write_texture_to_file},
    projection::Projection,
    stopwatch::Stopwatch,
    texture::{Color, Texture},
};
use crate::error::ConfigError;

use super::{
    ifs_engine::{IfsEngine, IfsSystem},
    post_process::{finalize, PostProcessParams},
};

/**
 * Complete set of parameters that are fed in from the JSON for an IFS texture
 * render. The inverse maps are validated while parsing (non-empty, finite).
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IfsTextureParams {
    pub resolution: nalgebra::Vector2<u32>,
    pub iteration_count: u32,
    #[serde(default)]
    pub projection: Projection,
    pub inverse_maps: IfsSystem,
    pub post_process: PostProcessParams,
    #[serde(default)]
    pub save_intermediate_textures: bool,
}

impl IfsTextureParams {
    /// Checks everything that must hold before any rendering work starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution[0] == 0 || self.resolution[1] == 0 {
            return Err(ConfigError::EmptyResolution {
                width: self.resolution[0],
                height: self.resolution[1],
            });
        }
        if self.iteration_count == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        self.post_process.validate()
    }
}

/**
 * Everything a render produces, kept in memory so that callers (and tests) can
 * inspect it without reading the files back.
 */
pub struct IfsTextureRender {
    /// Converged texture after the last pass, unclamped.
    pub texture: Texture,
    /// Re-projected, gamma-corrected view with every channel in `[0, 1]`.
    pub image: Texture,
    /// Per-channel maximum after each pass.
    pub pass_channel_max: Vec<Color>,
}

/**
 * Runs the engine and the post-processor, without touching the filesystem.
 * `on_pass` sees the texture of every generation as soon as it is complete.
 */
pub fn compute_ifs_texture<F>(
    params: &IfsTextureParams,
    stopwatch: &mut Stopwatch,
    mut on_pass: F,
) -> Result<IfsTextureRender, Box<dyn std::error::Error>>
where
    F: FnMut(u32, &Texture) -> Result<(), Box<dyn std::error::Error>>,
{
    params.validate()?;

    log::info!(
        "Initializing {}x{} seed texture...",
        params.resolution[0],
        params.resolution[1]
    );
    let mut engine = IfsEngine::new(
        params.inverse_maps.clone(),
        params.projection,
        params.resolution,
        params.iteration_count,
    )?;
    stopwatch.record_split("seed_texture".to_owned());

    let mut pass_channel_max = Vec::with_capacity(params.iteration_count as usize);
    while let Some(texture) = engine.step() {
        let pass = pass_channel_max.len() as u32;
        let channel_max = texture.channel_max();
        log::info!("Iteration: {} / {}", pass + 1, params.iteration_count);
        log::debug!("Iteration {} channel max: {:?}", pass, channel_max.as_slice());
        on_pass(pass, texture)?;
        pass_channel_max.push(channel_max);
        stopwatch.record_split(format!("pass_{}", pass));
    }
    let texture = engine.into_texture();

    log::info!("Re-projecting final image...");
    let image = finalize(&texture, &params.post_process, &params.projection);
    stopwatch.record_split("re_project".to_owned());

    Ok(IfsTextureRender {
        texture,
        image,
        pass_channel_max,
    })
}

/**
 * Called by the CLI, used to render the IFS texture and write all of the
 * output files that share `file_prefix`.
 */
pub fn render_ifs_texture(
    params: &IfsTextureParams,
    file_prefix: &FilePrefix,
) -> Result<(), Box<dyn std::error::Error>> {
    // Reject bad configurations before anything is written to disk.
    params.validate()?;

    let mut stopwatch = Stopwatch::new("IFS Texture Stopwatch".to_owned());

    std::fs::write(
        file_prefix.full_path_with_suffix(".json"),
        serde_json::to_string_pretty(params)?,
    )?;
    stopwatch.record_split("setup".to_owned());

    let save_intermediate_textures = params.save_intermediate_textures;
    let render = compute_ifs_texture(params, &mut stopwatch, |pass, texture| {
        if save_intermediate_textures {
            let clamped = Texture::from_fn(*texture.resolution(), |pixel| {
                clamp_color(&texture[pixel])
            });
            let suffix = format!("_pass_{}.png", pass);
            write_texture_to_file(&clamped, &file_prefix.full_path_with_suffix(&suffix))?;
        }
        Ok(())
    })?;

    write_texture_to_file(
        &render.texture,
        &file_prefix.full_path_with_suffix("_texture.png"),
    )?;
    write_texture_to_file(&render.image, &file_prefix.full_path_with_suffix(".png"))?;
    stopwatch.record_split("write_png".to_owned());

    let mut diagnostics_file = file_prefix.create_file_with_suffix("_diagnostics.txt")?;
    stopwatch.display(&mut diagnostics_file)?;
    writeln!(diagnostics_file, "Channel maximum after each pass:")?;
    for (pass, channel_max) in render.pass_channel_max.iter().enumerate() {
        writeln!(
            diagnostics_file,
            "  pass {}: [{:.6}, {:.6}, {:.6}]",
            pass, channel_max[0], channel_max[1], channel_max[2]
        )?;
    }

    Ok(())
}
