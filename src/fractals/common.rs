use serde::{Deserialize, Serialize};

use super::ifs_texture::IfsTextureParams;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub enum FractalParams {
    IfsTexture(Box<IfsTextureParams>),
}
