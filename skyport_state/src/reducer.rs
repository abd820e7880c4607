// Copyright 2026 the Skyport Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pure state-transition function.

use alloc::sync::Arc;
use alloc::vec::Vec;

use skyport_align::{AlignMode, align_member, align_scroll, rotation_to_match};
use skyport_plot::{Plot, PlotId};
use skyport_view::{ViewLocks, Viewport, ViewportId};

use crate::intent::Intent;
use crate::root::{VisRoot, ViewportGroup};

/// Applies one intent to the root, returning the next root.
///
/// See the crate docs for the no-op, referential-identity, and fan-out
/// guarantees.
#[must_use]
pub fn reduce(root: &VisRoot, intent: &Intent) -> VisRoot {
    reduce_with_changes(root, intent).0
}

/// Like [`reduce`], additionally reporting which viewport ids were replaced.
///
/// The id list is the explicit change-notification channel: an empty list
/// means every viewport in the result is pointer-equal to its input
/// counterpart.
#[must_use]
pub fn reduce_with_changes(root: &VisRoot, intent: &Intent) -> (VisRoot, Vec<ViewportId>) {
    match intent {
        Intent::AddViewport {
            id,
            group,
            descriptor,
            context,
            view_dim,
        } => {
            if root.index_of(id).is_some() {
                return noop(root);
            }
            let Ok(plots) = Plot::from_descriptor(PlotId::new(id.as_str()), descriptor) else {
                return noop(root);
            };
            let vp = Viewport::create(id.clone(), group.clone(), plots, *context)
                .with_view_dim(*view_dim)
                .recenter(None);

            let mut next = root.clone();
            if next.group(group).is_none() {
                next.groups.push(ViewportGroup {
                    id: group.clone(),
                    position_lock: false,
                });
            }
            next.viewports.push(Arc::new(vp));
            next.active = Some(id.clone());
            (next, alloc::vec![id.clone()])
        }

        Intent::RemoveViewport { id } => {
            let Some(idx) = root.index_of(id) else {
                return noop(root);
            };
            let mut next = root.clone();
            let removed = next.viewports.remove(idx);
            let group = removed.group().clone();
            if next.viewports.iter().all(|vp| vp.group() != &group) {
                next.groups.retain(|g| g.id != group);
            }
            if next.active.as_ref() == Some(id) {
                next.active = None;
            }
            if next.wcs_master.as_ref() == Some(id) {
                next.wcs_master = None;
                next.align_mode = AlignMode::None;
            }
            (next, alloc::vec![id.clone()])
        }

        Intent::SetActive { id } => {
            if root.index_of(id).is_none() || root.active.as_ref() == Some(id) {
                return noop(root);
            }
            let mut next = root.clone();
            next.active = Some(id.clone());
            (next, Vec::new())
        }

        Intent::ReplacePlotData { id, descriptor } => {
            let Some(idx) = root.index_of(id) else {
                // The viewport may have been removed while the fetch was in
                // flight; absorbing the late arrival keeps the loop alive.
                return noop(root);
            };
            let Ok(plots) = Plot::from_descriptor(PlotId::new(id.as_str()), descriptor) else {
                return noop(root);
            };
            let mut vp = root.viewports[idx].replace_plots(plots).recenter(None);
            vp = realign_from_master(root, vp);
            commit(root, alloc::vec![(idx, vp)])
        }

        Intent::Zoom { id, factor } => {
            let Some(target_idx) = root.index_of(id) else {
                return noop(root);
            };
            let target = &root.viewports[target_idx];

            // The group-lock fan-out scope: flagged members of the same
            // group follow the zoom, everyone else is untouched.
            let mut affected = alloc::vec![target_idx];
            if target.context().locks.contains(ViewLocks::GROUP) {
                for (idx, vp) in root.viewports.iter().enumerate() {
                    if idx != target_idx
                        && vp.group() == target.group()
                        && vp.context().locks.contains(ViewLocks::GROUP)
                    {
                        affected.push(idx);
                    }
                }
            }

            let mut changed = Vec::with_capacity(affected.len());
            for idx in affected {
                match root.viewports[idx].with_zoom(*factor) {
                    Ok(vp) => changed.push((idx, vp)),
                    // A bad factor leaves the previous state fully intact.
                    Err(_) => return noop(root),
                }
            }

            // With a WCS match active, non-masters re-derive their scroll
            // from the master — the freshly zoomed master if it was in the
            // fan-out, the existing one otherwise.
            if root.align_mode != AlignMode::None
                && let Some(master_id) = root.wcs_master.clone()
            {
                let master_vp = changed
                    .iter()
                    .find(|(_, vp)| vp.id() == &master_id)
                    .map(|(_, vp)| vp.clone())
                    .or_else(|| root.viewport(&master_id).map(|a| (**a).clone()));
                if let Some(master_vp) = master_vp {
                    for (_, vp) in &mut changed {
                        if vp.id() != &master_id
                            && let Some(scroll) =
                                align_scroll(&master_vp, vp, root.align_mode).scroll()
                        {
                            *vp = vp.set_scroll(scroll);
                        }
                    }
                }
            }
            commit(root, changed)
        }

        Intent::Scroll { id, scroll } => {
            let Some(target_idx) = root.index_of(id) else {
                return noop(root);
            };
            let target = root.viewports[target_idx].set_scroll(*scroll);
            let mut changed = alloc::vec![(target_idx, target)];
            propagate_position(root, target_idx, &mut changed, |master, member| {
                align_member(master, member, root.align_mode, true)
                    .scroll()
                    .map(|s| member.set_scroll(s))
            });
            commit(root, changed)
        }

        Intent::Rotate { id, to, north_lock } => {
            let Some(target_idx) = root.index_of(id) else {
                return noop(root);
            };
            let target = root.viewports[target_idx].rotate(*to, *north_lock);
            let mut changed = alloc::vec![(target_idx, target)];
            propagate_position(root, target_idx, &mut changed, |master, member| {
                let angle = rotation_to_match(
                    master.rotation_deg(),
                    east_left(master),
                    east_left(member),
                );
                Some(member.with_rotation_deg(angle))
            });
            commit(root, changed)
        }

        Intent::Flip { id, axis } => {
            let Some(target_idx) = root.index_of(id) else {
                return noop(root);
            };
            let target = root.viewports[target_idx].flip(*axis);
            let mut changed = alloc::vec![(target_idx, target)];
            propagate_position(root, target_idx, &mut changed, |_, member| {
                Some(member.flip(*axis))
            });
            commit(root, changed)
        }

        Intent::Recenter { id, on } => {
            let Some(target_idx) = root.index_of(id) else {
                return noop(root);
            };
            let target = root.viewports[target_idx].recenter(*on);
            let mut changed = alloc::vec![(target_idx, target)];
            propagate_position(root, target_idx, &mut changed, |master, member| {
                align_member(master, member, root.align_mode, true)
                    .scroll()
                    .map(|s| member.set_scroll(s))
            });
            commit(root, changed)
        }

        Intent::Resize { id, view_dim } => {
            let Some(idx) = root.index_of(id) else {
                return noop(root);
            };
            let vp = root.viewports[idx].resize(*view_dim);
            let vp = realign_from_master(root, vp);
            commit(root, alloc::vec![(idx, vp)])
        }

        Intent::ChangeActiveModel { id, index } => {
            let Some(idx) = root.index_of(id) else {
                return noop(root);
            };
            let vp = &root.viewports[idx];
            if *index >= vp.plots().len() || *index == vp.prime_idx() {
                return noop(root);
            }
            commit(root, alloc::vec![(idx, vp.change_active_plot(*index))])
        }

        Intent::ChangeAlignmentMode { mode, master } => {
            if *mode == AlignMode::None {
                if root.align_mode == AlignMode::None && root.wcs_master.is_none() {
                    return noop(root);
                }
                let mut next = root.clone();
                next.align_mode = AlignMode::None;
                next.wcs_master = None;
                return (next, Vec::new());
            }
            let Some(master_id) = master else {
                return noop(root);
            };
            let Some(master_idx) = root.index_of(master_id) else {
                return noop(root);
            };

            let master_vp = Arc::clone(&root.viewports[master_idx]);
            let mut changed = Vec::new();
            for (idx, vp) in root.viewports.iter().enumerate() {
                if idx == master_idx {
                    continue;
                }
                if let Some(scroll) = align_scroll(&master_vp, vp, *mode).scroll() {
                    changed.push((idx, vp.set_scroll(scroll)));
                }
            }
            let (mut next, ids) = commit(root, changed);
            next.align_mode = *mode;
            next.wcs_master = Some(master_id.clone());
            (next, ids)
        }

        Intent::SetPositionLock { group, lock } => {
            let Some(record) = root.group(group) else {
                return noop(root);
            };
            if record.position_lock == *lock {
                return noop(root);
            }
            let mut next = root.clone();
            if let Some(record) = next.groups.iter_mut().find(|g| &g.id == group) {
                record.position_lock = *lock;
            }
            (next, Vec::new())
        }

        Intent::ChangeProjectionCenter { id, center } => {
            let Some(idx) = root.index_of(id) else {
                return noop(root);
            };
            commit(
                root,
                alloc::vec![(idx, root.viewports[idx].retarget_projection(*center))],
            )
        }
    }
}

fn noop(root: &VisRoot) -> (VisRoot, Vec<ViewportId>) {
    (root.clone(), Vec::new())
}

/// Replaces the viewports at the given indexes, sharing everything else.
fn commit(root: &VisRoot, changed: Vec<(usize, Viewport)>) -> (VisRoot, Vec<ViewportId>) {
    if changed.is_empty() {
        return noop(root);
    }
    let mut next = root.clone();
    let mut ids = Vec::with_capacity(changed.len());
    for (idx, vp) in changed {
        ids.push(vp.id().clone());
        next.viewports[idx] = Arc::new(vp);
    }
    (next, ids)
}

/// Runs the position-locked fan-out: applies `follow` to every other member
/// of the target's group when that group carries the position lock.
///
/// `changed` must already hold the updated target at index 0; the updated
/// value is what members follow, not the stale input.
fn propagate_position(
    root: &VisRoot,
    target_idx: usize,
    changed: &mut Vec<(usize, Viewport)>,
    follow: impl Fn(&Viewport, &Viewport) -> Option<Viewport>,
) {
    let master = changed[0].1.clone();
    if !root.position_lock(master.group()) {
        return;
    }
    for (idx, vp) in root.viewports.iter().enumerate() {
        if idx != target_idx
            && vp.group() == master.group()
            && let Some(updated) = follow(&master, vp)
        {
            changed.push((idx, updated));
        }
    }
}

/// Re-derives a non-master viewport's scroll from the WCS-match master, when
/// a match is active. Master and unmatched pairs pass through untouched.
fn realign_from_master(root: &VisRoot, vp: Viewport) -> Viewport {
    if root.align_mode == AlignMode::None {
        return vp;
    }
    let Some(master_id) = root.wcs_master.as_ref() else {
        return vp;
    };
    if vp.id() == master_id {
        return vp;
    }
    let Some(master) = root.viewport(master_id) else {
        return vp;
    };
    match align_scroll(master, &vp, root.align_mode).scroll() {
        Some(scroll) => vp.set_scroll(scroll),
        None => vp,
    }
}

fn east_left(vp: &Viewport) -> bool {
    vp.converter().is_some_and(|cc| cc.is_east_left_of_north())
}
