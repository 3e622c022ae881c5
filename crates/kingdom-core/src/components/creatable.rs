//! Creatable instances and the list of creations in progress.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::catalog::creatable::{CreatableTemplate, OutputAction};

/// Quantity and application rule for one output resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpec {
    pub count: u32,
    pub action: OutputAction,
}

/// A creatable being built in this session.
///
/// Progress only moves forward: `ticks_done` grows by one per [`tick`](Creatable::tick)
/// until it reaches `ticks_required`, and stays there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creatable {
    pub name: String,
    pub description: String,
    ticks_required: u32,
    ticks_done: u32,
    pre_requisites: BTreeMap<String, u32>,
    outputs: BTreeMap<String, OutputSpec>,
    /// Prerequisites have been taken from the inventory
    paid: bool,
}

impl Creatable {
    pub fn new(name: impl Into<String>, description: impl Into<String>, ticks_required: u32) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ticks_required,
            ticks_done: 0,
            pre_requisites: BTreeMap::new(),
            outputs: BTreeMap::new(),
            paid: false,
        }
    }

    /// Fresh instance built field by field from a catalog template
    pub fn from_template(template: &CreatableTemplate) -> Self {
        Self {
            name: template.name.clone(),
            description: template.description.clone(),
            ticks_required: template.ticks_required,
            ticks_done: 0,
            pre_requisites: template.pre_requisites.clone(),
            outputs: template.outputs.clone(),
            paid: false,
        }
    }

    pub fn with_pre_requisite(mut self, resource: impl Into<String>, count: u32) -> Self {
        self.add_pre_requisite(resource, count);
        self
    }

    pub fn with_output(mut self, resource: impl Into<String>, count: u32, action: OutputAction) -> Self {
        self.add_output(resource, count, action);
        self
    }

    /// Require `count` more of a resource
    pub fn add_pre_requisite(&mut self, resource: impl Into<String>, count: u32) {
        let required = self.pre_requisites.entry(resource.into()).or_insert(0);
        *required = required.saturating_add(count);
    }

    /// Produce `count` more of a resource on completion
    pub fn add_output(&mut self, resource: impl Into<String>, count: u32, action: OutputAction) {
        let spec = self
            .outputs
            .entry(resource.into())
            .or_insert(OutputSpec { count: 0, action });
        spec.count = spec.count.saturating_add(count);
        spec.action = action;
    }

    pub fn ticks_required(&self) -> u32 {
        self.ticks_required
    }

    pub fn ticks_done(&self) -> u32 {
        self.ticks_done
    }

    pub fn pre_requisites(&self) -> &BTreeMap<String, u32> {
        &self.pre_requisites
    }

    pub fn outputs(&self) -> &BTreeMap<String, OutputSpec> {
        &self.outputs
    }

    pub fn is_complete(&self) -> bool {
        self.ticks_done >= self.ticks_required
    }

    /// Progress in whole percent, 0..=100. A zero-tick creatable is 100% complete.
    pub fn percent_complete(&self) -> u32 {
        if self.ticks_required == 0 {
            return 100;
        }
        let percent = u64::from(self.ticks_done) * 100 / u64::from(self.ticks_required);
        percent.min(100) as u32
    }

    /// Advance by one tick. Returns `true` only on the tick that completes the creatable.
    pub fn tick(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.ticks_done += 1;
        self.is_complete()
    }

    pub fn is_paid(&self) -> bool {
        self.paid
    }

    pub(crate) fn mark_paid(&mut self) {
        self.paid = true;
    }
}

impl fmt::Display for Creatable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) {}% complete",
            self.name,
            self.description,
            self.percent_complete()
        )?;
        for (resource, count) in &self.pre_requisites {
            write!(f, "\n\t{} : {}", resource, count)?;
        }
        Ok(())
    }
}

/// Resource: creations queued in this session, in the order they were added
#[derive(Resource, Debug, Clone, Default)]
pub struct Creations {
    items: Vec<Creatable>,
}

impl Creations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, creation: Creatable) {
        self.items.push(creation);
    }

    pub fn as_slice(&self) -> &[Creatable] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Creatable> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Creatable> {
        self.items.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|c| c.is_complete()).count()
    }

    /// Drop finished creations, returning how many were removed
    pub fn prune_completed(&mut self) -> usize {
        self.prune_where(Creatable::is_complete)
    }

    /// Drop every creation matching `done`, returning how many were removed
    pub fn prune_where(&mut self, mut done: impl FnMut(&Creatable) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(|c| !done(c));
        before - self.items.len()
    }
}
