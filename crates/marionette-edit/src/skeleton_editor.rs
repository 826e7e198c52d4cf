//! 骨骼编辑器
//!
//! 按下/拖拽/释放三段式状态机：
//! - 按下：优先抓取既有顶点；否则拆分容差内最近的边并抓取新顶点；
//!   两者都没有时从按下点新建一条两顶点肢体，抓取其末端
//! - 拖拽：被抓顶点跟随指针
//! - 释放：若被抓顶点与其他顶点落在合并容差内，删除被抓顶点完成
//!   合并；退化的肢体整条剪除
//!
//! 只按下不拖拽会让新肢体的两个顶点重合，释放时随即被合并剪除，
//! 单击因此不会留下退化肢体。

use marionette_core::math::Point2;
use marionette_core::pick::{PickConfig, PickEngine, PickHit};
use marionette_core::skeleton::{DeleteOutcome, Skeleton, VertexId};

use crate::config::EditConfig;

/// 编辑器状态
#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    /// 空闲
    Idle,
    /// 拖拽顶点中
    Dragging(VertexId),
}

/// 一次按下的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PressOutcome {
    /// 抓住了既有顶点
    GrabbedVertex(VertexId),
    /// 拆分边得到的新顶点
    SplitEdge(VertexId),
    /// 新建了肢体（返回其末端顶点）
    NewLimb(VertexId),
}

/// 一次释放的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReleaseOutcome {
    /// 顶点留在原地
    Kept,
    /// 被抓顶点与邻近顶点合并（被删除）
    Merged,
    /// 合并使肢体退化，整条被剪除
    LimbPruned,
    /// 当前没有拖拽
    NoDrag,
}

/// 骨骼编辑器
pub struct SkeletonEditor {
    skeleton: Skeleton,
    config: EditConfig,
    picker: PickEngine,
    status: Status,
}

impl SkeletonEditor {
    pub fn new(skeleton: Skeleton, config: EditConfig) -> Self {
        let picker = PickEngine::new(PickConfig {
            tolerance: config.pick_tolerance,
        });
        Self {
            skeleton,
            config,
            picker,
            status: Status::Idle,
        }
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn into_skeleton(self) -> Skeleton {
        self.skeleton
    }

    pub fn config(&self) -> &EditConfig {
        &self.config
    }

    /// 当前被抓的顶点
    pub fn dragged_vertex(&self) -> Option<VertexId> {
        match self.status {
            Status::Dragging(id) => Some(id),
            Status::Idle => None,
        }
    }

    /// 指针按下
    pub fn press(&mut self, point: Point2) -> PressOutcome {
        // 第一选择：抓取既有顶点
        if let Some(PickHit::Vertex { id, .. }) = self.picker.find_vertex(&self.skeleton, point) {
            self.status = Status::Dragging(id);
            tracing::debug!(vertex = ?id, "grabbed vertex");
            return PressOutcome::GrabbedVertex(id);
        }

        // 第二选择：拆分最近的边，抓取拆分点
        if let Some(PickHit::Edge {
            id, point: split, ..
        }) = self.picker.find_edge(&self.skeleton, point)
        {
            if let Ok(vertex) = self.skeleton.split_edge(id, split) {
                self.status = Status::Dragging(vertex);
                return PressOutcome::SplitEdge(vertex);
            }
        }

        // 最后：新建肢体
        let tip = self.skeleton.add_limb(point, point);
        self.status = Status::Dragging(tip);
        PressOutcome::NewLimb(tip)
    }

    /// 指针拖拽
    pub fn drag(&mut self, point: Point2) {
        if let Status::Dragging(id) = self.status {
            let _ = self.skeleton.set_vertex(id, point);
        }
    }

    /// 指针释放
    pub fn release(&mut self) -> ReleaseOutcome {
        let Status::Dragging(id) = self.status else {
            return ReleaseOutcome::NoDrag;
        };
        self.status = Status::Idle;

        let Some(position) = self.skeleton.vertex(id) else {
            return ReleaseOutcome::Kept;
        };

        // 被抓顶点本身也在计数内，>= 2 即存在可合并的邻近顶点
        let nearby = self
            .skeleton
            .vertices()
            .filter(|&(_, vertex)| (vertex - position).norm() <= self.config.merge_tolerance)
            .count();
        if nearby < 2 {
            return ReleaseOutcome::Kept;
        }

        match self.skeleton.delete_vertex(id) {
            Ok(DeleteOutcome::LimbPruned(_)) => ReleaseOutcome::LimbPruned,
            Ok(DeleteOutcome::VertexRemoved) => {
                tracing::debug!(vertex = ?id, "merged vertex");
                ReleaseOutcome::Merged
            }
            Err(_) => ReleaseOutcome::Kept,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marionette_core::math::EPSILON;
    use marionette_core::skeleton::PolygonId;

    fn editor() -> SkeletonEditor {
        SkeletonEditor::new(Skeleton::default(), EditConfig::default())
    }

    #[test]
    fn test_press_empty_space_creates_limb() {
        let mut editor = editor();
        let outcome = editor.press(Point2::new(2.0, 2.0));
        assert!(matches!(outcome, PressOutcome::NewLimb(_)));
        assert_eq!(editor.skeleton().limbs().len(), 1);

        editor.drag(Point2::new(3.0, 2.0));
        assert_eq!(editor.release(), ReleaseOutcome::Kept);

        let limb = editor.skeleton().limb(0).unwrap();
        assert_eq!(limb.vertex(0), Point2::new(2.0, 2.0));
        assert_eq!(limb.vertex(1), Point2::new(3.0, 2.0));
    }

    #[test]
    fn test_click_without_drag_leaves_nothing() {
        let mut editor = editor();
        editor.press(Point2::new(2.0, 2.0));
        let outcome = editor.release();
        assert_eq!(outcome, ReleaseOutcome::LimbPruned);
        assert!(editor.skeleton().limbs().is_empty());
    }

    #[test]
    fn test_press_grabs_existing_vertex() {
        let mut editor = editor();
        let outcome = editor.press(Point2::new(0.52, 0.52));
        match outcome {
            PressOutcome::GrabbedVertex(id) => {
                assert_eq!(id.polygon, PolygonId::Torso);
                assert_eq!(id.index, 2);
            }
            other => panic!("expected vertex grab, got {:?}", other),
        }

        editor.drag(Point2::new(0.8, 0.9));
        editor.release();
        assert_eq!(
            editor.skeleton().torso().vertex(2),
            Point2::new(0.8, 0.9)
        );
    }

    #[test]
    fn test_press_splits_edge() {
        let mut editor = editor();
        // 底边中部，离顶点都远
        let outcome = editor.press(Point2::new(0.0, -0.55));
        match outcome {
            PressOutcome::SplitEdge(id) => {
                assert_eq!(id.polygon, PolygonId::Torso);
                assert_eq!(id.index, 1);
            }
            other => panic!("expected edge split, got {:?}", other),
        }
        assert_eq!(editor.skeleton().torso().vertex_count(), 5);
        // 新顶点落在边上
        let split = editor.skeleton().torso().vertex(1);
        assert!((split - Point2::new(0.0, -0.5)).norm() < EPSILON);

        editor.drag(Point2::new(0.0, -1.5));
        assert_eq!(editor.release(), ReleaseOutcome::Kept);
        assert_eq!(
            editor.skeleton().torso().vertex(1),
            Point2::new(0.0, -1.5)
        );
    }

    #[test]
    fn test_release_merges_onto_neighbor() {
        let mut editor = editor();
        // 新建肢体并拉开
        editor.press(Point2::new(2.0, 2.0));
        editor.drag(Point2::new(3.0, 3.0));
        editor.release();

        // 把肢体末端拖回基点附近再释放：合并后肢体退化被剪除
        let outcome = editor.press(Point2::new(3.0, 3.0));
        assert!(matches!(outcome, PressOutcome::GrabbedVertex(_)));
        editor.drag(Point2::new(2.05, 2.0));
        assert_eq!(editor.release(), ReleaseOutcome::LimbPruned);
        assert!(editor.skeleton().limbs().is_empty());
    }

    #[test]
    fn test_release_without_press() {
        let mut editor = editor();
        assert_eq!(editor.release(), ReleaseOutcome::NoDrag);
    }

    #[test]
    fn test_merge_torso_vertices() {
        let mut editor = editor();
        // 把躯干角点拖到相邻角点上合并
        editor.press(Point2::new(0.5, 0.5));
        editor.drag(Point2::new(0.5, -0.45));
        assert_eq!(editor.release(), ReleaseOutcome::Merged);
        assert_eq!(editor.skeleton().torso().vertex_count(), 3);
    }
}
