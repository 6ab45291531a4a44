use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use yaml_rust2::{Yaml, YamlLoader};

use crate::kinematic_traits::{Joints, Position};
use crate::parameters::arm_kinematics::Parameters;

#[derive(Debug, Clone)]
pub struct Case {
    pub id: i64,
    pub parameters: String,
    /// Degrees, base first.
    pub joints: Joints,
    pub position: Position,
}

fn floats<const N: usize>(node: &Yaml, what: &str) -> Result<[f64; N]> {
    let items = node.as_vec().ok_or_else(|| anyhow!("{} is not a list", what))?;
    if items.len() != N {
        return Err(anyhow!("{} must have {} values, has {}", what, N, items.len()));
    }
    let mut values = [0.0; N];
    for (value, item) in values.iter_mut().zip(items) {
        *value = match item {
            Yaml::Integer(i) => *i as f64,
            Yaml::Real(_) => item.as_f64().ok_or_else(|| anyhow!("bad number in {}", what))?,
            _ => return Err(anyhow!("{} holds a non number", what)),
        };
    }
    Ok(values)
}

pub fn load_yaml<P: AsRef<Path>>(filename: P) -> Result<Vec<Case>> {
    let path = filename.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let docs = YamlLoader::load_from_str(&contents)
        .with_context(|| format!("parsing {}", path.display()))?;
    let root = docs.first().ok_or_else(|| anyhow!("{} is empty", path.display()))?;
    let list = root["cases"].as_vec().ok_or_else(|| anyhow!("no cases in {}", path.display()))?;

    let mut cases = Vec::with_capacity(list.len());
    for node in list {
        let id = node["id"].as_i64().ok_or_else(|| anyhow!("case without id"))?;
        let parameters = node["parameters"]
            .as_str()
            .ok_or_else(|| anyhow!("case {} has no parameters", id))?
            .to_string();
        let joints = floats::<4>(&node["joints"], "joints").with_context(|| format!("case {}", id))?;
        let position = floats::<3>(&node["position"], "position").with_context(|| format!("case {}", id))?;
        cases.push(Case {
            id,
            parameters,
            joints,
            position: Position::from(position),
        });
    }
    Ok(cases)
}

pub fn create_parameter_map() -> HashMap<String, Parameters> {
    let mut map = HashMap::new();
    map.insert("desk_arm".to_string(), Parameters::desk_arm());
    map.insert("me_arm".to_string(), Parameters::me_arm());
    map
}
