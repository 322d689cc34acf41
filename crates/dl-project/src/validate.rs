//! Scenario validation logic.

use crate::schema::{NodeDef, OpeningDef, Scenario};
use std::collections::HashSet;

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    if !(scenario.timestep.is_finite() && scenario.timestep > 0.0) {
        return Err(invalid("timestep", scenario.timestep, "must be positive"));
    }
    if let Some(g) = scenario.options.gravity {
        if !(g.is_finite() && g > 0.0) {
            return Err(invalid("options.gravity", g, "must be positive"));
        }
    }

    let mut names = HashSet::new();
    for node in &scenario.nodes {
        if !names.insert(node.name.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: node.name.clone(),
                context: "nodes".to_string(),
            });
        }
        validate_node(node)?;
    }

    Ok(())
}

fn validate_node(node: &NodeDef) -> Result<(), ValidationError> {
    let fields = [
        ("invert_elev", node.invert_elev),
        ("full_depth", node.full_depth),
        ("depth", node.depth),
        ("overland_depth", node.overland_depth),
        ("coupling_area", node.coupling_area),
    ];
    for (field, value) in fields {
        if !value.is_finite() {
            return Err(invalid(
                &format!("nodes.{}.{field}", node.name),
                value,
                "must be finite",
            ));
        }
    }
    if node.coupling_area < 0.0 {
        return Err(invalid(
            &format!("nodes.{}.coupling_area", node.name),
            node.coupling_area,
            "must not be negative",
        ));
    }

    let mut ids = HashSet::new();
    for opening in &node.openings {
        if !ids.insert(opening.id) {
            return Err(ValidationError::DuplicateId {
                id: opening.id.to_string(),
                context: format!("node '{}' openings", node.name),
            });
        }
        validate_opening(&node.name, opening)?;
    }
    Ok(())
}

fn validate_opening(node: &str, opening: &OpeningDef) -> Result<(), ValidationError> {
    let prefix = format!("nodes.{node}.openings.{}", opening.id);
    for (field, value) in [("area", opening.area), ("width", opening.width)] {
        if !(value.is_finite() && value > 0.0) {
            return Err(invalid(&format!("{prefix}.{field}"), value, "must be positive"));
        }
    }
    let coeffs = [
        ("orifice_coeff", opening.orifice_coeff),
        ("free_weir_coeff", opening.free_weir_coeff),
        ("submerged_weir_coeff", opening.submerged_weir_coeff),
    ];
    for (field, value) in coeffs {
        if !(value.is_finite() && value >= 0.0) {
            return Err(invalid(
                &format!("{prefix}.{field}"),
                value,
                "must be non-negative",
            ));
        }
    }
    Ok(())
}

fn invalid(field: &str, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
