pub mod common;
pub mod ifs_engine;
pub mod ifs_map;
pub mod ifs_texture;
pub mod post_process;
