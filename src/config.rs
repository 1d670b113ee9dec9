//! JSON grammar files.
//!
//! ```json
//! {
//!     "actions": { "F": "draw", "+": "turnL", "-": "turnR" },
//!     "axiom": "F",
//!     "rules": { "F": ["F+F-F"] },
//!     "parameters": { "step": 2.0, "angle": 60.0, "start": [0.0, 0.0, 0.0] }
//! }
//! ```
//!
//! `rules`, `parameters`, `parameters.start` and `seed` are optional.

use crate::error::{Error, Result};
use crate::grammar::Grammar;
use crate::state_turtle::StateTurtle;
use crate::turtle::{Turtle, Units};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// A grammar file as written on disk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LSystemConfig {
    /// Symbol character to action name.
    pub actions: BTreeMap<String, String>,

    pub axiom: String,

    /// Symbol character to its alternative expansions.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleBodies>,

    #[serde(default)]
    pub parameters: Option<Parameters>,

    /// Seed for picking between alternative expansions.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// One expansion or a list of alternatives.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleBodies {
    One(String),
    Many(Vec<String>),
}

impl RuleBodies {
    pub fn as_slice(&self) -> &[String] {
        match self {
            RuleBodies::One(body) => std::slice::from_ref(body),
            RuleBodies::Many(bodies) => bodies,
        }
    }
}

/// Starting units and pose.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub step: f64,

    /// Turn angle in degrees.
    pub angle: f64,

    /// `[x, y, heading]`, heading in degrees.
    #[serde(default)]
    pub start: Option<[f64; 3]>,
}

impl LSystemConfig {
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        let config = Self::from_json(&source)?;
        debug!(
            path = %path.display(),
            actions = config.actions.len(),
            rules = config.rules.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Populates `grammar` with the actions, axiom and rules, and writes the
    /// starting units and pose into `turtle`.
    pub fn apply<T: Turtle + ?Sized>(&self, grammar: &mut Grammar, turtle: &mut T) -> Result<()> {
        for (key, name) in &self.actions {
            grammar.set_action(single_char("actions", key)?, name.as_str());
        }

        grammar.set_axiom(&self.axiom);

        for (key, bodies) in &self.rules {
            let ch = single_char("rules", key)?;
            for body in bodies.as_slice() {
                grammar.add_rule(ch, body);
            }
        }

        if let Some(params) = &self.parameters {
            turtle.set_units(Units {
                step: params.step,
                angle: params.angle,
            });
            if let Some([x, y, heading]) = params.start {
                turtle.reset(DVec2::new(x, y), heading);
            }
        }

        if let Some(seed) = self.seed {
            grammar.set_seed(seed);
        }

        Ok(())
    }

    /// Builds a fresh grammar and a [`StateTurtle`] holding the starting pose.
    pub fn build(&self) -> Result<(Grammar, StateTurtle)> {
        let mut grammar = Grammar::new();
        let mut turtle = StateTurtle::new();
        self.apply(&mut grammar, &mut turtle)?;
        Ok((grammar, turtle))
    }
}

fn single_char(section: &str, key: &str) -> Result<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(Error::config(format!(
            "{section} key `{key}` must be exactly one character"
        ))),
    }
}
