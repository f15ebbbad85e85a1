//! Sandbox entities built through the pool

use entity_pool::foundation::math::{Quat, Transform, Vec3};
use entity_pool::{BuildError, PooledInstance, Template, TemplateId};

/// Kind of sandbox entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Moving projectile
    Bullet,
    /// Stationary one-shot effect
    Explosion,
}

/// Template for sandbox entities
#[derive(Debug, Clone)]
pub struct SandboxTemplate {
    /// Pool key
    pub id: TemplateId,
    /// What gets built
    pub kind: EntityKind,
    /// Speed along the forward axis (units per second)
    pub speed: f32,
}

impl SandboxTemplate {
    /// Bullet template flying at `speed`
    pub fn bullet(speed: f32) -> Self {
        Self {
            id: TemplateId::from("bullet"),
            kind: EntityKind::Bullet,
            speed,
        }
    }
    
    /// Explosion template
    pub fn explosion() -> Self {
        Self {
            id: TemplateId::from("explosion"),
            kind: EntityKind::Explosion,
            speed: 0.0,
        }
    }
}

impl Template for SandboxTemplate {
    type Instance = SandboxEntity;
    
    fn id(&self) -> TemplateId {
        self.id.clone()
    }
    
    fn build(&self, position: Vec3, orientation: Quat) -> Result<SandboxEntity, BuildError> {
        if !self.speed.is_finite() {
            return Err(BuildError::new(format!("{:?} speed must be finite, got {}", self.kind, self.speed)));
        }
        
        Ok(SandboxEntity {
            transform: Transform::from_position_rotation(position, orientation),
            speed: self.speed,
            visible: true,
        })
    }
}

/// A built sandbox entity
#[derive(Debug, Clone)]
pub struct SandboxEntity {
    /// World transform
    pub transform: Transform,
    /// Forward speed
    pub speed: f32,
    /// Render visibility, driven by the pool
    pub visible: bool,
}

impl SandboxEntity {
    /// Move forward for `delta_time` seconds
    pub fn advance(&mut self, delta_time: f32) {
        let offset = self.transform.forward() * self.speed * delta_time;
        self.transform.translate(&offset);
    }
}

impl PooledInstance for SandboxEntity {
    fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }
    
    fn set_orientation(&mut self, orientation: Quat) {
        self.transform.rotation = orientation;
    }
    
    fn set_active(&mut self, active: bool) {
        self.visible = active;
    }
    
    fn is_active(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_bullet_advances_forward() {
        let mut bullet = SandboxTemplate::bullet(10.0)
            .build(Vec3::zeros(), Quat::identity())
            .unwrap();
        
        bullet.advance(0.5);
        assert_eq!(bullet.transform.position, Vec3::new(0.0, 0.0, -5.0));
    }
    
    #[test]
    fn test_non_finite_speed_fails_to_build() {
        let result = SandboxTemplate::bullet(f32::INFINITY).build(Vec3::zeros(), Quat::identity());
        assert!(result.is_err());
    }
}
