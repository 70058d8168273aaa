use dock_core::{DropTarget, LayoutEngine, PaneId, Rect, SplitDirection, Vec2};

use crate::drop_zone::resolve_drop_zone;
use crate::node::{split_rect, PaneNode};
use crate::PaneLayout;

impl PaneLayout {
    /// Rect occupied by node `id` when the whole layout fills `area`.
    pub fn node_rect(&self, area: Rect, id: PaneId) -> Option<Rect> {
        let target = self.resolve(id)?;
        let mut current = self.root;
        let mut rect = area;
        loop {
            if current == target {
                return Some(rect);
            }
            let split = self.panes.split(current)?;
            let (first_rect, second_rect) = split_rect(rect, split.direction, split.ratio);
            if self.subtree_contains(split.first, target) {
                current = split.first;
                rect = first_rect;
            } else {
                current = split.second;
                rect = second_rect;
            }
        }
    }

    fn subtree_contains(&self, root: PaneId, target: PaneId) -> bool {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if id == target {
                return true;
            }
            if let Some(split) = self.panes.split(id) {
                stack.push(split.first);
                stack.push(split.second);
            }
        }
        false
    }

    fn collect_rects(&self, id: PaneId, rect: Rect, out: &mut Vec<(PaneId, Rect)>) {
        match self.panes.get(id) {
            Some(PaneNode::Leaf(leaf)) => out.push((leaf.id, rect)),
            Some(PaneNode::Split(split)) => {
                let (first_rect, second_rect) = split_rect(rect, split.direction, split.ratio);
                self.collect_rects(split.first, first_rect, out);
                self.collect_rects(split.second, second_rect, out);
            }
            None => {}
        }
    }

    /// Find the split whose border is closest to `position`, given the rect
    /// the node at `id` occupies.
    fn find_border_at(&self, id: PaneId, rect: Rect, position: Vec2, best: &mut Option<(f32, PaneId)>) {
        let Some(split) = self.panes.split(id) else {
            return;
        };
        let (dist, in_range) = match split.direction {
            SplitDirection::Horizontal => {
                let border = rect.x + rect.width * split.ratio;
                (
                    (position.x - border).abs(),
                    position.y >= rect.y && position.y <= rect.y + rect.height,
                )
            }
            SplitDirection::Vertical => {
                let border = rect.y + rect.height * split.ratio;
                (
                    (position.y - border).abs(),
                    position.x >= rect.x && position.x <= rect.x + rect.width,
                )
            }
        };
        if in_range && best.map_or(true, |(best_dist, _)| dist < best_dist) {
            *best = Some((dist, split.id));
        }

        let (first_rect, second_rect) = split_rect(rect, split.direction, split.ratio);
        self.find_border_at(split.first, first_rect, position, best);
        self.find_border_at(split.second, second_rect, position, best);
    }
}

impl LayoutEngine for PaneLayout {
    fn compute(&self, area: Rect) -> Vec<(PaneId, Rect)> {
        let mut result = Vec::new();
        self.collect_rects(self.root, area, &mut result);
        result
    }

    fn split_border_at(&self, area: Rect, point: Vec2, threshold: f32) -> Option<PaneId> {
        let mut best = None;
        self.find_border_at(self.root, area, point, &mut best);
        best.filter(|(dist, _)| *dist <= threshold).map(|(_, id)| id)
    }

    fn ratio_at(&self, area: Rect, split: PaneId, point: Vec2) -> Option<f32> {
        let id = self.resolve(split)?;
        let node = self.panes.split(id)?;
        let rect = self.node_rect(area, id)?;
        let ratio = match node.direction {
            SplitDirection::Horizontal if rect.width > 0.0 => (point.x - rect.x) / rect.width,
            SplitDirection::Vertical if rect.height > 0.0 => (point.y - rect.y) / rect.height,
            _ => return None,
        };
        Some(ratio.clamp(self.min_ratio, 1.0 - self.min_ratio))
    }

    fn drop_target_at(&self, area: Rect, point: Vec2, edge_threshold: f32) -> Option<DropTarget> {
        let (pane, rect) = self
            .compute(area)
            .into_iter()
            .find(|(_, rect)| rect.contains(point))?;
        let local = rect.to_local(point);
        let zone = resolve_drop_zone(local.x, local.y, rect.width, rect.height, edge_threshold);
        Some(DropTarget::new(pane, zone))
    }
}
