//! 骨骼模型
//!
//! 一个闭合躯干多边形加若干开链肢体。顶点与边用
//! (多边形, 下标) 稳定寻址，所有编辑操作经由骨骼本身进行，
//! 外部不持有顶点的可变引用。
//!
//! 生命周期约定：肢体由编辑器创建；拖拽与逆运动学就地改写顶点；
//! 顶点删除使开链肢体退化到两顶点以下时，整条肢体被剪除。

use crate::geometry::{Chain, Segment};
use crate::math::Point2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 骨骼操作错误
#[derive(Error, Debug)]
pub enum SkeletonError {
    #[error("vertex does not exist in this skeleton")]
    InvalidVertex,

    #[error("edge does not exist in this skeleton")]
    InvalidEdge,

    #[error("cannot remove the last vertex of the torso")]
    LastTorsoVertex,
}

/// 多边形标识：躯干或第 n 条肢体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolygonId {
    Torso,
    Limb(usize),
}

/// 顶点标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VertexId {
    pub polygon: PolygonId,
    pub index: usize,
}

/// 边标识（边 i 连接顶点 i 与 i+1；闭链末边回绕到顶点 0）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeId {
    pub polygon: PolygonId,
    pub index: usize,
}

/// 顶点删除的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// 仅移除了顶点
    VertexRemoved,
    /// 顶点移除使肢体退化，整条肢体被剪除
    LimbPruned(usize),
}

/// 骨骼：闭合躯干加开链肢体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skeleton {
    torso: Chain,
    limbs: Vec<Chain>,
}

impl Default for Skeleton {
    /// 以单位正方形躯干（逆时针）起步，没有肢体
    fn default() -> Self {
        let torso = Chain::new(
            vec![
                Point2::new(-0.5, -0.5),
                Point2::new(0.5, -0.5),
                Point2::new(0.5, 0.5),
                Point2::new(-0.5, 0.5),
            ],
            true,
        )
        .expect("torso template has four vertices");
        Self {
            torso,
            limbs: Vec::new(),
        }
    }
}

impl Skeleton {
    pub fn new(torso: Chain, limbs: Vec<Chain>) -> Self {
        Self { torso, limbs }
    }

    pub fn torso(&self) -> &Chain {
        &self.torso
    }

    pub fn limbs(&self) -> &[Chain] {
        &self.limbs
    }

    pub fn limb(&self, index: usize) -> Option<&Chain> {
        self.limbs.get(index)
    }

    /// 所有多边形：躯干在前，肢体按序
    pub fn polygons(&self) -> impl Iterator<Item = (PolygonId, &Chain)> + '_ {
        std::iter::once((PolygonId::Torso, &self.torso)).chain(
            self.limbs
                .iter()
                .enumerate()
                .map(|(i, limb)| (PolygonId::Limb(i), limb)),
        )
    }

    pub fn polygon(&self, id: PolygonId) -> Option<&Chain> {
        match id {
            PolygonId::Torso => Some(&self.torso),
            PolygonId::Limb(index) => self.limbs.get(index),
        }
    }

    fn polygon_mut(&mut self, id: PolygonId) -> Option<&mut Chain> {
        match id {
            PolygonId::Torso => Some(&mut self.torso),
            PolygonId::Limb(index) => self.limbs.get_mut(index),
        }
    }

    /// 全部顶点及其标识
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, Point2)> + '_ {
        self.polygons().flat_map(|(polygon, chain)| {
            chain
                .vertices()
                .iter()
                .enumerate()
                .map(move |(index, &point)| (VertexId { polygon, index }, point))
        })
    }

    /// 全部边及其标识
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, Segment)> + '_ {
        self.polygons().flat_map(|(polygon, chain)| {
            chain
                .edges()
                .into_iter()
                .enumerate()
                .map(move |(index, segment)| (EdgeId { polygon, index }, segment))
        })
    }

    pub fn vertex(&self, id: VertexId) -> Option<Point2> {
        let chain = self.polygon(id.polygon)?;
        chain.vertices().get(id.index).copied()
    }

    /// 改写一个顶点
    pub fn set_vertex(&mut self, id: VertexId, point: Point2) -> Result<(), SkeletonError> {
        let chain = self
            .polygon_mut(id.polygon)
            .ok_or(SkeletonError::InvalidVertex)?;
        if id.index >= chain.vertex_count() {
            return Err(SkeletonError::InvalidVertex);
        }
        chain.set_vertex(id.index, point);
        Ok(())
    }

    /// 新增一条两顶点肢体，返回其末端顶点标识
    pub fn add_limb(&mut self, base: Point2, tip: Point2) -> VertexId {
        let limb = Chain::new(vec![base, tip], false).expect("limb template has two vertices");
        self.limbs.push(limb);
        let index = self.limbs.len() - 1;
        tracing::debug!(limb = index, "added limb");
        VertexId {
            polygon: PolygonId::Limb(index),
            index: 1,
        }
    }

    /// 在边上插入拆分点，返回新顶点的标识
    ///
    /// 新顶点插在边起点之后；闭链回绕边的拆分点追加到顶点序列末尾。
    pub fn split_edge(&mut self, id: EdgeId, point: Point2) -> Result<VertexId, SkeletonError> {
        let edge_count = self
            .polygon(id.polygon)
            .ok_or(SkeletonError::InvalidEdge)?
            .edges()
            .len();
        if id.index >= edge_count {
            return Err(SkeletonError::InvalidEdge);
        }
        let chain = self
            .polygon_mut(id.polygon)
            .ok_or(SkeletonError::InvalidEdge)?;
        chain.insert_vertex(id.index + 1, point);
        tracing::debug!(polygon = ?id.polygon, edge = id.index, "split edge");
        Ok(VertexId {
            polygon: id.polygon,
            index: id.index + 1,
        })
    }

    /// 删除一个顶点
    ///
    /// 两顶点的肢体再删即退化，整条剪除；躯干至少保留一个顶点。
    pub fn delete_vertex(&mut self, id: VertexId) -> Result<DeleteOutcome, SkeletonError> {
        match id.polygon {
            PolygonId::Torso => {
                if id.index >= self.torso.vertex_count() {
                    return Err(SkeletonError::InvalidVertex);
                }
                self.torso
                    .remove_vertex(id.index)
                    .map_err(|_| SkeletonError::LastTorsoVertex)?;
                Ok(DeleteOutcome::VertexRemoved)
            }
            PolygonId::Limb(limb_index) => {
                let limb = self
                    .limbs
                    .get_mut(limb_index)
                    .ok_or(SkeletonError::InvalidVertex)?;
                if id.index >= limb.vertex_count() {
                    return Err(SkeletonError::InvalidVertex);
                }
                if limb.vertex_count() <= 2 {
                    self.limbs.remove(limb_index);
                    tracing::debug!(limb = limb_index, "pruned degenerate limb");
                    return Ok(DeleteOutcome::LimbPruned(limb_index));
                }
                limb.remove_vertex(id.index)
                    .map_err(|_| SkeletonError::InvalidVertex)?;
                Ok(DeleteOutcome::VertexRemoved)
            }
        }
    }
}
