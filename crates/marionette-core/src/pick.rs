//! 拾取引擎
//!
//! 把世界坐标下的指针位置映射到骨骼的顶点或边。容差由调用方给定
//! （通常是屏幕像素半径按相机缩放换算成的世界单位），引擎只做几何
//! 度量，在容差内的候选中取距离最近的一个。

use crate::math::Point2;
use crate::skeleton::{EdgeId, Skeleton, VertexId};
use serde::{Deserialize, Serialize};

/// 拾取配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickConfig {
    /// 拾取容差（世界单位）
    pub tolerance: f64,
}

impl Default for PickConfig {
    fn default() -> Self {
        Self { tolerance: 0.1 }
    }
}

/// 拾取结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickHit {
    /// 命中顶点
    Vertex {
        id: VertexId,
        point: Point2,
        distance: f64,
    },
    /// 命中边（`point` 为边上最近点）
    Edge {
        id: EdgeId,
        point: Point2,
        distance: f64,
    },
}

impl PickHit {
    pub fn point(&self) -> Point2 {
        match self {
            PickHit::Vertex { point, .. } | PickHit::Edge { point, .. } => *point,
        }
    }

    pub fn distance(&self) -> f64 {
        match self {
            PickHit::Vertex { distance, .. } | PickHit::Edge { distance, .. } => *distance,
        }
    }
}

/// 拾取引擎
#[derive(Debug, Clone, Default)]
pub struct PickEngine {
    config: PickConfig,
}

impl PickEngine {
    pub fn new(config: PickConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PickConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut PickConfig {
        &mut self.config
    }

    /// 容差内最近的顶点
    pub fn find_vertex(&self, skeleton: &Skeleton, point: Point2) -> Option<PickHit> {
        skeleton
            .vertices()
            .map(|(id, vertex)| (id, vertex, (vertex - point).norm()))
            .filter(|(_, _, distance)| *distance <= self.config.tolerance)
            .min_by(|a, b| {
                a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(id, vertex, distance)| PickHit::Vertex {
                id,
                point: vertex,
                distance,
            })
    }

    /// 容差内最近的边（返回边上最近点）
    pub fn find_edge(&self, skeleton: &Skeleton, point: Point2) -> Option<PickHit> {
        skeleton
            .edges()
            .map(|(id, segment)| {
                let closest = segment.closest_point(point);
                (id, closest, (closest - point).norm())
            })
            .filter(|(_, _, distance)| *distance <= self.config.tolerance)
            .min_by(|a, b| {
                a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(id, closest, distance)| PickHit::Edge {
                id,
                point: closest,
                distance,
            })
    }

    /// 顶点优先，其次边
    pub fn find_best(&self, skeleton: &Skeleton, point: Point2) -> Option<PickHit> {
        self.find_vertex(skeleton, point)
            .or_else(|| self.find_edge(skeleton, point))
    }
}
