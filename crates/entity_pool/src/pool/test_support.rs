//! Templates and instances shared by the pool unit tests

use super::{BuildError, PooledInstance, Template, TemplateId};
use crate::foundation::math::{Quat, Vec3};
use std::cell::Cell;
use std::rc::Rc;

/// Instance that records everything the pool does to it
#[derive(Debug, Clone, PartialEq)]
pub struct Dummy {
    pub serial: usize,
    pub position: Vec3,
    pub orientation: Quat,
    pub active: bool,
}

impl PooledInstance for Dummy {
    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
    
    fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation;
    }
    
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
    
    fn is_active(&self) -> bool {
        self.active
    }
}

/// Template counting its builds, optionally failing once a build budget is spent
#[derive(Debug, Clone)]
pub struct DummyTemplate {
    pub id: TemplateId,
    pub builds: Rc<Cell<usize>>,
    pub fail_after: Option<usize>,
}

impl DummyTemplate {
    pub fn named(name: &str) -> Self {
        Self {
            id: TemplateId::from(name),
            builds: Rc::new(Cell::new(0)),
            fail_after: None,
        }
    }
    
    pub fn failing_after(name: &str, successful_builds: usize) -> Self {
        Self {
            fail_after: Some(successful_builds),
            ..Self::named(name)
        }
    }
    
    pub fn build_count(&self) -> usize {
        self.builds.get()
    }
}

impl Template for DummyTemplate {
    type Instance = Dummy;
    
    fn id(&self) -> TemplateId {
        self.id.clone()
    }
    
    fn build(&self, position: Vec3, orientation: Quat) -> Result<Dummy, BuildError> {
        let serial = self.builds.get();
        if self.fail_after.is_some_and(|limit| serial >= limit) {
            return Err(BuildError::new(format!("build budget of {serial} exhausted")));
        }
        self.builds.set(serial + 1);
        
        // Fresh builds come out enabled, like a newly instantiated scene object
        Ok(Dummy { serial, position, orientation, active: true })
    }
}
