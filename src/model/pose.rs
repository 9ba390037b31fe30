use super::timeline::{PoseId, IDLE_POSE};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Euler rotation of one joint, in radians
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JointRotation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl JointRotation {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    fn lerp(&self, other: &JointRotation, t: f32) -> JointRotation {
        JointRotation {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }
}

/// Joint targets for the figure
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pose {
    pub hips: JointRotation,
    pub spine: JointRotation,
    pub head: JointRotation,
    pub arm_l: JointRotation,
    pub arm_r: JointRotation,
    pub leg_l: JointRotation,
    pub leg_r: JointRotation,
}

impl Pose {
    /// Joint-wise linear interpolation; `t` is used as given
    pub fn lerp(&self, other: &Pose, t: f32) -> Pose {
        Pose {
            hips: self.hips.lerp(&other.hips, t),
            spine: self.spine.lerp(&other.spine, t),
            head: self.head.lerp(&other.head, t),
            arm_l: self.arm_l.lerp(&other.arm_l, t),
            arm_r: self.arm_r.lerp(&other.arm_r, t),
            leg_l: self.leg_l.lerp(&other.leg_l, t),
            leg_r: self.leg_r.lerp(&other.leg_r, t),
        }
    }
}

/// Hermite smoothstep on [0, 1]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Read-only pose table keyed by [`PoseId`]
///
/// Always contains an IDLE entry; lookups of unknown ids resolve to it.
#[derive(Debug, Clone)]
pub struct PoseLibrary {
    poses: HashMap<PoseId, Pose>,
}

impl PoseLibrary {
    /// Build a library, inserting a neutral IDLE pose if the table lacks one
    pub fn new(mut poses: HashMap<PoseId, Pose>) -> Self {
        poses.entry(PoseId::idle()).or_default();
        Self { poses }
    }

    /// Parse a JSON object of `{ "NAME": { "hips": {..}, .. } }`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let poses: HashMap<PoseId, Pose> =
            serde_json::from_str(json).context("Failed to parse pose library")?;
        Ok(Self::new(poses))
    }

    /// Load a pose library from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read pose library: {:?}", path))?;
        let library = Self::from_json_str(&json)?;
        log::info!("Loaded {} poses from {:?}", library.len(), path);
        Ok(library)
    }

    /// The poses shipped with the binary
    pub fn builtin() -> Self {
        let r = JointRotation::new;
        let idle = Pose {
            hips: r(0.0, 0.0, 0.0),
            spine: r(0.0, 0.0, 0.0),
            head: r(0.0, 0.0, 0.0),
            arm_l: r(0.0, 0.0, -1.3),
            arm_r: r(0.0, 0.0, 1.3),
            leg_l: r(0.0, 0.0, 0.0),
            leg_r: r(0.0, 0.0, 0.0),
        };
        let table = [
            (IDLE_POSE, idle),
            (
                "DAB",
                Pose {
                    spine: r(0.2, 0.0, 0.1),
                    head: r(0.5, 0.0, 0.3),
                    arm_l: r(0.0, 0.0, 0.6),
                    arm_r: r(0.0, 0.4, 0.9),
                    ..idle
                },
            ),
            (
                "KICK_LEFT",
                Pose {
                    spine: r(-0.1, 0.0, 0.0),
                    arm_l: r(0.0, 0.0, -0.4),
                    arm_r: r(0.0, 0.0, 0.4),
                    leg_l: r(-1.2, 0.0, 0.0),
                    ..idle
                },
            ),
            (
                "KICK_RIGHT",
                Pose {
                    spine: r(-0.1, 0.0, 0.0),
                    arm_l: r(0.0, 0.0, -0.4),
                    arm_r: r(0.0, 0.0, 0.4),
                    leg_r: r(-1.2, 0.0, 0.0),
                    ..idle
                },
            ),
            (
                "LUNGE_LEFT",
                Pose {
                    hips: r(0.0, 0.0, 0.15),
                    arm_l: r(0.0, 0.0, 0.0),
                    leg_l: r(0.0, 0.0, -0.5),
                    ..idle
                },
            ),
            (
                "LUNGE_RIGHT",
                Pose {
                    hips: r(0.0, 0.0, -0.15),
                    arm_r: r(0.0, 0.0, 0.0),
                    leg_r: r(0.0, 0.0, 0.5),
                    ..idle
                },
            ),
            (
                "PUMP_IT",
                Pose {
                    arm_l: r(0.0, 0.0, 1.4),
                    arm_r: r(0.0, 0.0, -1.4),
                    head: r(-0.2, 0.0, 0.0),
                    ..idle
                },
            ),
            (
                "DISCO_POINT",
                Pose {
                    hips: r(0.0, 0.0, 0.1),
                    arm_l: r(0.0, 0.0, -1.0),
                    arm_r: r(0.0, 0.0, -0.8),
                    head: r(0.2, 0.0, 0.2),
                    ..idle
                },
            ),
        ];

        Self::new(
            table
                .into_iter()
                .map(|(name, pose)| (PoseId::new(name), pose))
                .collect(),
        )
    }

    pub fn contains(&self, id: &PoseId) -> bool {
        self.poses.contains_key(id)
    }

    /// Look up a pose, falling back to IDLE for unknown ids
    pub fn resolve(&self, id: &PoseId) -> &Pose {
        self.poses
            .get(id)
            .unwrap_or_else(|| &self.poses[&PoseId::idle()])
    }

    /// Joint targets for a transition from `from` to `to`
    ///
    /// An unknown `from` resolves to IDLE; an unknown `to` holds `from`.
    /// The blend factor is eased with [`smoothstep`] before interpolating.
    pub fn blend(&self, from: &PoseId, to: &PoseId, factor: f64) -> Pose {
        let start = self.resolve(from);
        let end = self.poses.get(to).unwrap_or(start);
        start.lerp(end, smoothstep(factor as f32))
    }

    /// Pose names in sorted order
    pub fn names(&self) -> Vec<&PoseId> {
        let mut names: Vec<&PoseId> = self.poses.keys().collect();
        names.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        names
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }
}

impl Default for PoseLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}
