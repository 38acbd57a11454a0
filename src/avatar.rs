//! One performer's visual representation: every rig, which one is shown,
//! the mirror state and the indicators floating above the active rig.

use crate::config::RigConfig;
use crate::joint::PoseFrame;
use crate::rig::body::body_rig;
use crate::rig::robot::robot_rig;
use crate::rig::{
    ArticulatedRig, BodyVariant, MarkerRig, PartInstance, PrimitiveRig, Retargetable, RigId,
};
use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    /// Shows the latest grade
    Score,
    /// Beat-synchronised pulsing cube
    Pulse,
    /// Goal progress
    Progress,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 3] = [
        IndicatorKind::Score,
        IndicatorKind::Pulse,
        IndicatorKind::Progress,
    ];

    fn height(self, config: &RigConfig) -> f32 {
        match self {
            IndicatorKind::Score => config.score_indicator_height,
            IndicatorKind::Pulse => config.pulse_indicator_height,
            IndicatorKind::Progress => config.progress_indicator_height,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Indicator {
    pub kind: IndicatorKind,
    pub position: Vec3,
    pub active: bool,
}

pub struct Avatar {
    config: RigConfig,
    stick: PrimitiveRig,
    markers: MarkerRig,
    robot: ArticulatedRig,
    body: ArticulatedRig,
    active: RigId,
    mirrored: bool,
    indicators: Vec<Indicator>,
}

impl Avatar {
    /// Avatar with the stock robot and body rigs, placed at `origin`
    pub fn new(config: &RigConfig, origin: Vec3) -> Self {
        Self::with_rigs(config, origin, robot_rig(), body_rig(config.body_variant))
    }

    pub fn with_rigs(
        config: &RigConfig,
        origin: Vec3,
        robot: ArticulatedRig,
        body: ArticulatedRig,
    ) -> Self {
        let mut avatar = Self {
            config: config.clone(),
            stick: PrimitiveRig::new(config.stick_scale, config.segment_length_scale),
            markers: MarkerRig::new(config.marker_scale),
            robot,
            body,
            active: config.initial_rig,
            mirrored: config.mirrored,
            indicators: Vec::new(),
        };
        avatar.set_origin(origin);
        avatar.set_mirrored(config.mirrored);
        avatar.set_active_rig(config.initial_rig);
        avatar
    }

    pub fn rig(&self, id: RigId) -> &dyn Retargetable {
        match id {
            RigId::Primitive => &self.stick,
            RigId::Markers => &self.markers,
            RigId::Robot => &self.robot,
            RigId::Body => &self.body,
        }
    }

    fn rig_mut(&mut self, id: RigId) -> &mut dyn Retargetable {
        match id {
            RigId::Primitive => &mut self.stick,
            RigId::Markers => &mut self.markers,
            RigId::Robot => &mut self.robot,
            RigId::Body => &mut self.body,
        }
    }

    pub fn stick(&self) -> &PrimitiveRig {
        &self.stick
    }

    pub fn active_rig(&self) -> RigId {
        self.active
    }

    /// Drive the avatar with one tracked pose.
    ///
    /// The stick figure is always solved (the articulated rigs read from it);
    /// otherwise only the active rig is updated.
    pub fn retarget(&mut self, pose: &PoseFrame) {
        let stick = self.stick.solve(pose);
        self.stick.retarget(pose, &stick);
        if self.active != RigId::Primitive {
            let active = self.active;
            self.rig_mut(active).retarget(pose, &stick);
        }
        self.move_indicators(false);
    }

    /// Show `rig` and hide the others. Indicators jump to the new anchor.
    pub fn set_active_rig(&mut self, rig: RigId) {
        for id in RigId::ALL {
            self.rig_mut(id).set_active(id == rig);
        }
        if self.active != rig {
            log::info!("Active rig {:?} -> {:?}", self.active, rig);
        }
        self.active = rig;
        self.move_indicators(true);
    }

    /// Replace the body rig with another variant
    pub fn set_body_variant(&mut self, variant: BodyVariant) {
        let mut body = body_rig(variant);
        *body.root_mut() = *self.body.root();
        body.set_active(self.active == RigId::Body);
        self.body = body;
        self.config.body_variant = variant;
    }

    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    pub fn set_mirrored(&mut self, mirrored: bool) {
        self.mirrored = mirrored;
        for id in RigId::ALL {
            self.rig_mut(id).apply_mirror(mirrored);
        }
    }

    pub fn toggle_mirror(&mut self) {
        self.set_mirrored(!self.mirrored);
    }

    /// Move every rig root to `origin`
    pub fn set_origin(&mut self, origin: Vec3) {
        for id in RigId::ALL {
            self.rig_mut(id).root_mut().translation = origin;
        }
    }

    /// Where UI for `rig` is placed
    pub fn reference_anchor(&self, rig: RigId) -> Vec3 {
        self.rig(rig).reference_anchor()
    }

    /// Instances of the active rig's parts, for rendering
    pub fn part_instances(&self) -> Vec<PartInstance> {
        self.rig(self.active).part_instances()
    }

    /// Add an indicator above the active rig (replaces one of the same kind)
    pub fn attach_indicator(&mut self, kind: IndicatorKind) {
        let position = self.indicator_target(kind);
        self.indicators.retain(|indicator| indicator.kind != kind);
        self.indicators.push(Indicator {
            kind,
            position,
            active: true,
        });
    }

    pub fn set_indicator_active(&mut self, kind: IndicatorKind, active: bool) {
        if let Some(indicator) = self.indicators.iter_mut().find(|i| i.kind == kind) {
            indicator.active = active;
        }
    }

    pub fn indicator(&self, kind: IndicatorKind) -> Option<&Indicator> {
        self.indicators.iter().find(|i| i.kind == kind)
    }

    fn indicator_target(&self, kind: IndicatorKind) -> Vec3 {
        self.reference_anchor(self.active) + Vec3::new(0.0, kind.height(&self.config), 0.0)
    }

    /// Snap active indicators to their targets when `force` is set or any of
    /// them drifted further than the configured slack. Returns whether they
    /// moved.
    pub fn move_indicators(&mut self, force: bool) -> bool {
        let drifted = self.indicators.iter().filter(|i| i.active).any(|indicator| {
            indicator.position.distance(self.indicator_target(indicator.kind))
                > self.config.indicator_slack
        });
        if !(force || drifted) {
            return false;
        }

        let targets: Vec<Vec3> = self
            .indicators
            .iter()
            .map(|indicator| self.indicator_target(indicator.kind))
            .collect();
        for (indicator, target) in self.indicators.iter_mut().zip(targets) {
            if indicator.active {
                indicator.position = target;
            }
        }
        true
    }
}
