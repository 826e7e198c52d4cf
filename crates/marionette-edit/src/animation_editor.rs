//! 动画编辑器
//!
//! 在绑定骨骼之上编辑姿态序列：抓住某条肢体摆好后的末端执行器，
//! 拖拽时从绑定姿态重新求解逆运动学并刷新显示用的肢体。写入姿态
//! 的目标是求解后实际到达的末端，不是原始指针位置，重放时无需
//! 再次夹取到可达范围。

use marionette_core::geometry::Chain;
use marionette_core::ik;
use marionette_core::math::Point2;
use marionette_core::pose::{Animation, AnimationError};
use marionette_core::skeleton::Skeleton;

use crate::config::EditConfig;

/// 动画编辑器
pub struct AnimationEditor {
    skeleton: Skeleton,
    animation: Animation,
    pose_index: usize,
    /// 当前姿态施加后的肢体（用于显示与末端拾取）
    posed_limbs: Vec<Chain>,
    drag_limb: Option<usize>,
    config: EditConfig,
}

impl AnimationEditor {
    /// 接管骨骼与既有动画
    ///
    /// 骨骼在动画保存之后被编辑过时，各姿态的目标数在此对齐。
    pub fn new(skeleton: Skeleton, animation: Animation, config: EditConfig) -> Self {
        let mut editor = Self {
            skeleton,
            animation,
            pose_index: 0,
            posed_limbs: Vec::new(),
            drag_limb: None,
            config,
        };
        for index in 0..editor.animation.pose_count() {
            if let Some(pose) = editor.animation.pose_mut(index) {
                pose.resync(&editor.skeleton);
            }
        }
        editor.refresh();
        editor
    }

    /// 从骨骼当前状态开始一段新动画
    pub fn from_skeleton(skeleton: Skeleton, config: EditConfig) -> Self {
        let animation = Animation::new(&skeleton);
        Self::new(skeleton, animation, config)
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    pub fn into_parts(self) -> (Skeleton, Animation) {
        (self.skeleton, self.animation)
    }

    pub fn pose_index(&self) -> usize {
        self.pose_index
    }

    pub fn posed_limbs(&self) -> &[Chain] {
        &self.posed_limbs
    }

    pub fn dragged_limb(&self) -> Option<usize> {
        self.drag_limb
    }

    /// 重新施加当前姿态
    fn refresh(&mut self) {
        if let Some(pose) = self.animation.pose(self.pose_index) {
            self.posed_limbs = pose.apply(&self.skeleton);
        }
    }

    /// 指针按下：抓取容差内最近的末端执行器
    pub fn press(&mut self, point: Point2) -> Option<usize> {
        self.drag_limb = self
            .posed_limbs
            .iter()
            .enumerate()
            .map(|(index, limb)| (index, (limb.end_point() - point).norm()))
            .filter(|&(_, distance)| distance <= self.config.pick_tolerance)
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(index, _)| index);
        if let Some(index) = self.drag_limb {
            tracing::debug!(limb = index, "grabbed end effector");
        }
        self.drag_limb
    }

    /// 指针拖拽：从绑定姿态求解并把到达的末端写回当前姿态
    pub fn drag(&mut self, point: Point2) {
        let Some(index) = self.drag_limb else {
            return;
        };
        let Some(limb) = self.skeleton.limb(index) else {
            return;
        };
        let mut posed = limb.clone();
        ik::solve(&mut posed, point);

        let reached = posed.end_point();
        if let Some(pose) = self.animation.pose_mut(self.pose_index) {
            pose.set_target(index, reached);
        }
        self.posed_limbs[index] = posed;
    }

    /// 指针释放
    pub fn release(&mut self) {
        self.drag_limb = None;
    }

    /// 切到下一帧（回绕）
    pub fn next_pose(&mut self) {
        self.pose_index = self.animation.wrap_index(self.pose_index as isize + 1);
        self.refresh();
    }

    /// 切到上一帧（回绕）
    pub fn prev_pose(&mut self) {
        self.pose_index = self.animation.wrap_index(self.pose_index as isize - 1);
        self.refresh();
    }

    /// 在当前帧处复制插入一帧
    pub fn insert_pose(&mut self) -> Result<(), AnimationError> {
        self.animation.insert_pose(self.pose_index)
    }

    /// 删除当前帧并落到邻近帧
    pub fn remove_pose(&mut self) -> Result<(), AnimationError> {
        self.animation.remove_pose(self.pose_index)?;
        self.pose_index = self.pose_index.min(self.animation.pose_count() - 1);
        self.refresh();
        Ok(())
    }
}
