pub mod camera;
pub mod controller;
pub mod material;
pub mod texture;
pub mod tri_mesh;
pub mod vertex;
