//! Default hierarchical controller tree.
//!
//! Areas are `/`-separated paths; every segment is a node holding the controllers
//! registered directly under it. The whole tree is an immutable snapshot behind an
//! [`ArcSwap`]: lookups never lock, registrations copy the nodes along the area path and
//! publish a new root.
use std::{collections::HashMap, sync::Arc};

use arc_swap::ArcSwap;

use crate::{
    config::{DuplicatePolicy, TreeSettings},
    ports::{
        controller::{ControllerDescriptor, ControllerType},
        controller_tree::{ControllerTree, TreeError, TreeResult},
    },
};

#[derive(Debug, Clone)]
struct Registration {
    area: String,
    name: String,
    controller_type: ControllerType,
}

#[derive(Debug, Clone, Default)]
struct AreaNode {
    controllers: HashMap<String, Registration>,
    children: HashMap<String, Arc<AreaNode>>,
}

impl AreaNode {
    /// Copy of this node with `registration` stored under `segments`/`key`.
    fn with_controller(
        &self,
        segments: &[String],
        key: String,
        registration: Registration,
        policy: DuplicatePolicy,
    ) -> TreeResult<AreaNode> {
        let mut node = self.clone();
        match segments.split_first() {
            None => {
                if policy == DuplicatePolicy::Reject && node.controllers.contains_key(&key) {
                    return Err(TreeError::DuplicateController {
                        area: registration.area,
                        name: registration.name,
                    });
                }
                node.controllers.insert(key, registration);
            }
            Some((head, rest)) => {
                let child = node.children.get(head).cloned().unwrap_or_default();
                let child = child.with_controller(rest, key, registration, policy)?;
                node.children.insert(head.clone(), Arc::new(child));
            }
        }
        Ok(node)
    }

    fn find(&self, segments: &[String], key: &str) -> Option<&Registration> {
        match segments.split_first() {
            None => self.controllers.get(key),
            Some((head, rest)) => self.children.get(head)?.find(rest, key),
        }
    }

    fn count(&self) -> usize {
        self.controllers.len() + self.children.values().map(|child| child.count()).sum::<usize>()
    }

    fn collect(&self, out: &mut Vec<ControllerDescriptor>) {
        out.extend(self.controllers.values().map(|r| ControllerDescriptor {
            area: r.area.clone(),
            name: r.name.clone(),
            controller_type: r.controller_type.clone(),
        }));
        for child in self.children.values() {
            child.collect(out);
        }
    }
}

/// Hierarchical registry of controllers keyed by area path and name.
///
/// Matching is exact: a controller registered under `admin` is not visible from
/// `admin/users` or from the root. Keys are case-insensitive (Unicode lowercase folding) unless
/// [`TreeSettings::case_sensitive`] is set. Re-registering a key replaces the previous
/// entry or is rejected, per [`TreeSettings::on_duplicate`].
pub struct DefaultControllerTree {
    root: ArcSwap<AreaNode>,
    settings: TreeSettings,
}

impl Default for DefaultControllerTree {
    fn default() -> Self {
        Self::new(TreeSettings::default())
    }
}

impl DefaultControllerTree {
    pub fn new(settings: TreeSettings) -> Self {
        Self {
            root: ArcSwap::from_pointee(AreaNode::default()),
            settings,
        }
    }

    pub fn settings(&self) -> &TreeSettings {
        &self.settings
    }

    /// Number of registered controllers across all areas.
    pub fn len(&self) -> usize {
        self.root.load().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn fold(&self, value: &str) -> String {
        if self.settings.case_sensitive {
            value.to_string()
        } else {
            value.to_lowercase()
        }
    }

    /// Split an area path into folded segments. The empty path is the root.
    fn area_segments(&self, area: &str) -> TreeResult<Vec<String>> {
        let trimmed = area.trim_matches('/');
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }
        trimmed
            .split('/')
            .map(|segment| {
                if segment.is_empty() {
                    Err(TreeError::InvalidArea(area.to_string()))
                } else {
                    Ok(self.fold(segment))
                }
            })
            .collect()
    }
}

impl ControllerTree for DefaultControllerTree {
    fn add_controller(
        &self,
        area: &str,
        name: &str,
        controller_type: ControllerType,
    ) -> TreeResult<()> {
        let segments = self.area_segments(area)?;
        if name.is_empty() {
            return Err(TreeError::InvalidName {
                area: area.to_string(),
            });
        }
        let key = self.fold(name);
        let registration = Registration {
            area: area.trim_matches('/').to_string(),
            name: name.to_string(),
            controller_type,
        };

        let mut outcome = Ok(());
        self.root.rcu(|current| {
            match current.with_controller(
                &segments,
                key.clone(),
                registration.clone(),
                self.settings.on_duplicate,
            ) {
                Ok(next) => {
                    outcome = Ok(());
                    Arc::new(next)
                }
                Err(e) => {
                    outcome = Err(e);
                    Arc::clone(current)
                }
            }
        });

        if outcome.is_ok() {
            tracing::debug!(
                "Controller registered: area='{}', name='{}', type={}",
                registration.area,
                registration.name,
                registration.controller_type
            );
        }
        outcome
    }

    fn get_controller(&self, area: &str, name: &str) -> Option<ControllerType> {
        // An area that cannot be registered cannot match either
        let segments = self.area_segments(area).ok()?;
        self.root
            .load()
            .find(&segments, &self.fold(name))
            .map(|r| r.controller_type.clone())
    }

    fn descriptors(&self) -> Vec<ControllerDescriptor> {
        let mut out = Vec::new();
        self.root.load().collect(&mut out);
        out.sort_by(|a, b| (&a.area, &a.name).cmp(&(&b.area, &b.name)));
        out
    }
}
