/// The parts of an MTL material the viewers use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Material {
    pub name: String,
    /// File name from `map_Kd`, as written in the MTL file.
    pub diffuse_texture: Option<String>,
}

impl Material {
    pub fn new(name: impl Into<String>, diffuse_texture: Option<String>) -> Self {
        Material {
            name: name.into(),
            diffuse_texture,
        }
    }

    /// Reads the first material and its `map_Kd` out of MTL source text.
    ///
    /// Options such as `-s 1 1 1` before the file name are skipped; the file
    /// name is taken to be the last token on the line.
    pub fn first_from_mtl(source: &str) -> Option<Material> {
        let mut material: Option<Material> = None;

        for line in source.lines() {
            let line = line.trim();
            let mut tokens = line.split_whitespace();
            match tokens.next() {
                Some("newmtl") => {
                    if material.is_some() {
                        break;
                    }
                    let name = tokens.collect::<Vec<_>>().join(" ");
                    material = Some(Material::new(name, None));
                }
                Some("map_Kd") => {
                    let Some(current) = material.as_mut() else {
                        continue;
                    };
                    if current.diffuse_texture.is_none() {
                        current.diffuse_texture = tokens.last().map(str::to_owned);
                    }
                }
                _ => {}
            }
        }

        material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_first_material_texture() {
        let mtl = "\
# exported
newmtl brick
Kd 1.0 1.0 1.0
map_Kd brick.png

newmtl other
map_Kd other.png
";
        let material = Material::first_from_mtl(mtl).unwrap();
        assert_eq!(material.name, "brick");
        assert_eq!(material.diffuse_texture.as_deref(), Some("brick.png"));
    }

    #[test]
    fn skips_map_options() {
        let mtl = "newmtl m\nmap_Kd -s 2 2 1 -o 0 0 0 tiles.png\n";
        let material = Material::first_from_mtl(mtl).unwrap();
        assert_eq!(material.diffuse_texture.as_deref(), Some("tiles.png"));
    }

    #[test]
    fn material_without_texture() {
        let material = Material::first_from_mtl("newmtl plain\nKd 0.5 0.5 0.5\n").unwrap();
        assert_eq!(material.diffuse_texture, None);
        assert!(Material::first_from_mtl("# nothing here\n").is_none());
    }
}
