//! 姿态与动画
//!
//! `Pose` 为每条肢体记录一个末端执行器目标点；`Animation` 是姿态
//! 序列。施加姿态时从绑定骨骼出发逐肢体求解逆运动学，绑定骨骼本身
//! 不被修改。目标点序列加循环标志即动画的全部可持久化状态。

use crate::geometry::Chain;
use crate::ik;
use crate::math::Point2;
use crate::skeleton::Skeleton;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 动画操作错误
#[derive(Error, Debug)]
pub enum AnimationError {
    #[error("animation requires at least one pose")]
    LastPose,

    #[error("pose index {0} out of range")]
    PoseOutOfRange(usize),
}

/// 单个姿态：每条肢体一个末端目标
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pose {
    targets: Vec<Point2>,
}

impl Pose {
    /// 捕获骨骼各肢体当前的末端位置
    pub fn capture(skeleton: &Skeleton) -> Self {
        Self {
            targets: skeleton.limbs().iter().map(Chain::end_point).collect(),
        }
    }

    pub fn targets(&self) -> &[Point2] {
        &self.targets
    }

    pub fn target(&self, limb: usize) -> Option<Point2> {
        self.targets.get(limb).copied()
    }

    /// 改写一条肢体的目标；下标越界时不生效
    pub fn set_target(&mut self, limb: usize, target: Point2) -> bool {
        match self.targets.get_mut(limb) {
            Some(slot) => {
                *slot = target;
                true
            }
            None => false,
        }
    }

    /// 使目标数与骨骼肢体数一致
    ///
    /// 骨骼在姿态捕获之后被编辑过时调用：新肢体补记当前末端，
    /// 已删除肢体的目标被截掉。
    pub fn resync(&mut self, skeleton: &Skeleton) {
        let limbs = skeleton.limbs();
        self.targets.truncate(limbs.len());
        for limb in limbs.iter().skip(self.targets.len()) {
            self.targets.push(limb.end_point());
        }
    }

    /// 把姿态施加到骨骼上，返回摆好的肢体（绑定骨骼不变）
    ///
    /// 没有对应目标的肢体按绑定姿态原样返回。
    pub fn apply(&self, skeleton: &Skeleton) -> Vec<Chain> {
        skeleton
            .limbs()
            .iter()
            .enumerate()
            .map(|(index, limb)| {
                let mut posed = limb.clone();
                if let Some(target) = self.target(index) {
                    ik::solve(&mut posed, target);
                }
                posed
            })
            .collect()
    }
}

/// 姿态序列
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animation {
    poses: Vec<Pose>,
    /// 播放到末尾后是否回到开头
    pub looped: bool,
}

impl Animation {
    /// 从骨骼当前状态新建单姿态动画
    pub fn new(skeleton: &Skeleton) -> Self {
        Self {
            poses: vec![Pose::capture(skeleton)],
            looped: true,
        }
    }

    pub fn pose_count(&self) -> usize {
        self.poses.len()
    }

    pub fn pose(&self, index: usize) -> Option<&Pose> {
        self.poses.get(index)
    }

    pub fn pose_mut(&mut self, index: usize) -> Option<&mut Pose> {
        self.poses.get_mut(index)
    }

    /// 在下标处复制插入一份该姿态（时间轴插帧）
    pub fn insert_pose(&mut self, index: usize) -> Result<(), AnimationError> {
        let pose = self
            .poses
            .get(index)
            .ok_or(AnimationError::PoseOutOfRange(index))?
            .clone();
        self.poses.insert(index, pose);
        Ok(())
    }

    /// 删除下标处的姿态；最后一个姿态不可删除
    pub fn remove_pose(&mut self, index: usize) -> Result<(), AnimationError> {
        if index >= self.poses.len() {
            return Err(AnimationError::PoseOutOfRange(index));
        }
        if self.poses.len() <= 1 {
            return Err(AnimationError::LastPose);
        }
        self.poses.remove(index);
        Ok(())
    }

    /// 时间轴下标回绕
    pub fn wrap_index(&self, index: isize) -> usize {
        index.rem_euclid(self.poses.len() as isize) as usize
    }
}
