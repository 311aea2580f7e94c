pub mod coordinate_map;
pub mod file_io;
pub mod image_utils;
pub mod projection;
pub mod stopwatch;
pub mod texture;
