//! 几何内核
//!
//! 两个基础类型：
//! - 线段 (Segment)：长度、方向、最近点投影
//! - 链 (Chain)：带开/闭标志的有序顶点序列，即躯干多边形与肢体链
//!   的统一表示，提供边、有向面积、环绕方向、包含测试与可达半径
//!
//! 内核只做纯几何度量，不引入容差；命中判定的半径由调用方给定。

use crate::math::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 几何错误
#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("chain requires at least one vertex")]
    EmptyChain,

    #[error("cannot remove the last vertex of a chain")]
    LastVertex,
}

/// 有向线段
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// 计算线段长度
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// 计算线段方向向量（单位向量）
    pub fn direction(&self) -> Vector2 {
        (self.end - self.start).normalize()
    }

    /// 计算线段中点
    pub fn midpoint(&self) -> Point2 {
        Point2::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }

    /// 计算线段上到给定点最近的点
    ///
    /// 投影参数截断到 [0,1]；零长度线段返回起点。
    pub fn closest_point(&self, point: Point2) -> Point2 {
        let v = self.end - self.start;
        let w = point - self.start;

        let c1 = w.dot(&v);
        if c1 <= 0.0 {
            return self.start;
        }

        let c2 = v.dot(&v);
        if c2 <= c1 {
            return self.end;
        }

        self.start + v * (c1 / c2)
    }

    /// 计算点到线段的距离
    pub fn distance_to_point(&self, point: Point2) -> f64 {
        (point - self.closest_point(point)).norm()
    }
}

/// 链：有序顶点序列加开/闭标志
///
/// 闭链表示躯干多边形，开链表示肢体。顶点序列加 `closed` 就是链的
/// 全部状态，外部序列化器快照这两项即可完整还原。
/// 顶点只能按下标读写，不暴露可变引用。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chain {
    vertices: Vec<Point2>,
    closed: bool,
}

impl Chain {
    /// 创建链；顶点数必须 ≥ 1
    pub fn new(vertices: Vec<Point2>, closed: bool) -> Result<Self, GeometryError> {
        if vertices.is_empty() {
            return Err(GeometryError::EmptyChain);
        }
        Ok(Self { vertices, closed })
    }

    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// 读取下标处的顶点
    pub fn vertex(&self, index: usize) -> Point2 {
        self.vertices[index]
    }

    /// 改写下标处的顶点
    pub fn set_vertex(&mut self, index: usize, point: Point2) {
        self.vertices[index] = point;
    }

    /// 在下标处插入顶点，原下标及之后的顶点后移
    pub fn insert_vertex(&mut self, index: usize, point: Point2) {
        self.vertices.insert(index, point);
    }

    /// 移除下标处的顶点；最后一个顶点不可移除
    pub fn remove_vertex(&mut self, index: usize) -> Result<Point2, GeometryError> {
        if self.vertices.len() == 1 {
            return Err(GeometryError::LastVertex);
        }
        Ok(self.vertices.remove(index))
    }

    /// 首顶点
    pub fn starting_point(&self) -> Point2 {
        self.vertices[0]
    }

    /// 末端点：闭链回到首顶点，开链为最后一个顶点
    pub fn end_point(&self) -> Point2 {
        if self.closed {
            self.vertices[0]
        } else {
            self.vertices[self.vertices.len() - 1]
        }
    }

    /// 链的边：相邻顶点对；闭链且顶点数 ≥ 3 时追加回绕边
    pub fn edges(&self) -> Vec<Segment> {
        let mut edges: Vec<Segment> = self
            .vertices
            .windows(2)
            .map(|pair| Segment::new(pair[0], pair[1]))
            .collect();
        if self.closed && self.vertices.len() >= 3 {
            edges.push(Segment::new(
                self.vertices[self.vertices.len() - 1],
                self.vertices[0],
            ));
        }
        edges
    }

    /// 各边长度，与 `edges` 同序
    pub fn lengths(&self) -> Vec<f64> {
        self.edges().iter().map(Segment::length).collect()
    }

    /// 有向面积（鞋带公式）；开链约定为 0
    pub fn signed_area(&self) -> f64 {
        if !self.closed {
            return 0.0;
        }
        let n = self.vertices.len();
        let mut sum = 0.0;
        for i in 0..n {
            let v1 = self.vertices[i];
            let v2 = self.vertices[(i + 1) % n];
            sum += v1.x * v2.y - v2.x * v1.y;
        }
        sum / 2.0
    }

    /// 顶点序是否为顺时针（有向面积为负）
    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    /// 就地反转顶点序（翻转环绕方向）
    pub fn reverse(&mut self) {
        self.vertices.reverse();
    }

    /// 末端执行器离基点的最大可达距离：各段长度之和
    ///
    /// 仅对开链有意义。
    pub fn max_radius(&self) -> f64 {
        self.vertices
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).norm())
            .sum()
    }

    /// 基点周围不可达"死区"的半径：max(0, 最长段 − 其余段之和)
    ///
    /// 仅对开链有意义；不足两段时为 0。
    pub fn min_radius(&self) -> f64 {
        let lengths: Vec<f64> = self
            .vertices
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).norm())
            .collect();
        if lengths.len() < 2 {
            return 0.0;
        }
        let total: f64 = lengths.iter().sum();
        let longest = lengths.iter().cloned().fold(0.0, f64::max);
        (longest - (total - longest)).max(0.0)
    }

    /// 奇偶规则点包含测试；开链恒为 false
    ///
    /// 对每条边采用半开的 y 跨度约定 `min(y1,y2) < y ≤ max(y1,y2)`，
    /// 水平边不计，竖直边在 `x ≤ x1` 时计入。共享顶点处由此不会被
    /// 重复计数。
    pub fn contains_point(&self, point: Point2) -> bool {
        if !self.closed {
            return false;
        }
        let n = self.vertices.len();
        let mut count = 0;
        for i in 0..n {
            let v1 = self.vertices[i];
            let v2 = self.vertices[(i + 1) % n];
            let (x1, y1) = (v1.x, v1.y);
            let (x2, y2) = (v2.x, v2.y);
            if y1.min(y2) < point.y
                && point.y <= y1.max(y2)
                && point.x <= x1.max(x2)
                && y1 != y2
            {
                if x1 == x2 || point.x <= (point.y - y1) * (x2 - x1) / (y2 - y1) + x1 {
                    count += 1;
                }
            }
        }
        count % 2 != 0
    }

    /// 计算点到链的距离（所有边取最小；单顶点链取到该顶点的距离）
    pub fn distance_to_point(&self, point: Point2) -> f64 {
        let edges = self.edges();
        if edges.is_empty() {
            return (point - self.vertices[0]).norm();
        }
        edges
            .iter()
            .map(|edge| edge.distance_to_point(point))
            .fold(f64::MAX, f64::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::EPSILON;

    fn unit_square() -> Chain {
        Chain::new(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(0.0, 1.0),
            ],
            true,
        )
        .unwrap()
    }

    #[test]
    fn test_segment_length() {
        let seg = Segment::new(Point2::new(0.0, 0.0), Point2::new(3.0, 4.0));
        assert!((seg.length() - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_segment_closest_point() {
        let seg = Segment::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));

        // 投影落在线段内
        let p = seg.closest_point(Point2::new(5.0, 5.0));
        assert!((p.x - 5.0).abs() < EPSILON);
        assert!(p.y.abs() < EPSILON);

        // 投影截断到起点
        let p = seg.closest_point(Point2::new(-5.0, 0.0));
        assert!(p.x.abs() < EPSILON);

        // 投影截断到终点
        let p = seg.closest_point(Point2::new(15.0, 3.0));
        assert!((p.x - 10.0).abs() < EPSILON);

        // 零长度线段返回起点
        let degenerate = Segment::new(Point2::new(2.0, 2.0), Point2::new(2.0, 2.0));
        let p = degenerate.closest_point(Point2::new(0.0, 0.0));
        assert!((p.x - 2.0).abs() < EPSILON);
        assert!((p.y - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_empty_chain_rejected() {
        assert!(Chain::new(vec![], false).is_err());
        assert!(Chain::new(vec![], true).is_err());
    }

    #[test]
    fn test_edges_open_and_closed() {
        let open = Chain::new(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(2.0, 0.0),
            ],
            false,
        )
        .unwrap();
        assert_eq!(open.edges().len(), 2);

        let closed = unit_square();
        assert_eq!(closed.edges().len(), 4);

        // 单顶点开链没有边
        let point = Chain::new(vec![Point2::origin()], false).unwrap();
        assert!(point.edges().is_empty());

        // 两顶点闭链不追加回绕边
        let pair = Chain::new(vec![Point2::origin(), Point2::new(1.0, 0.0)], true).unwrap();
        assert_eq!(pair.edges().len(), 1);
    }

    #[test]
    fn test_signed_area_and_winding() {
        // 逆时针单位正方形：面积 +1
        let mut square = unit_square();
        assert!((square.signed_area() - 1.0).abs() < EPSILON);
        assert!(!square.is_clockwise());

        // 反转后面积取负、环绕方向翻转
        square.reverse();
        assert!((square.signed_area() + 1.0).abs() < EPSILON);
        assert!(square.is_clockwise());

        // 开链面积约定为 0
        let open = Chain::new(vec![Point2::origin(), Point2::new(1.0, 0.0)], false).unwrap();
        assert_eq!(open.signed_area(), 0.0);
    }

    #[test]
    fn test_contains_point() {
        let square = unit_square();
        assert!(square.contains_point(Point2::new(0.5, 0.5)));
        assert!(!square.contains_point(Point2::new(1.5, 0.5)));
        assert!(!square.contains_point(Point2::new(0.5, -0.5)));
    }

    #[test]
    fn test_contains_point_boundary() {
        let square = unit_square();

        // 顶点与水平底边按半开约定落在外侧
        assert!(!square.contains_point(Point2::new(0.0, 0.0)));
        assert!(!square.contains_point(Point2::new(0.5, 0.0)));

        // 水平顶边落在内侧（单次计数，无重复）
        assert!(square.contains_point(Point2::new(0.5, 1.0)));

        // 左右竖直边各计一次：右边在内，左边在外
        assert!(square.contains_point(Point2::new(1.0, 0.5)));
        assert!(!square.contains_point(Point2::new(0.0, 0.5)));
    }

    #[test]
    fn test_contains_point_open_chain() {
        let open = Chain::new(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(1.0, 1.0),
            ],
            false,
        )
        .unwrap();
        assert!(!open.contains_point(Point2::new(0.9, 0.5)));
    }

    #[test]
    fn test_reach_radii() {
        // 3-4 两段链：最大可达 7，死区半径 1
        let limb = Chain::new(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(3.0, 0.0),
                Point2::new(3.0, 4.0),
            ],
            false,
        )
        .unwrap();
        assert!((limb.max_radius() - 7.0).abs() < EPSILON);
        assert!((limb.min_radius() - 1.0).abs() < EPSILON);

        // 等长两段：死区消失
        let even = Chain::new(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(2.0, 0.0),
                Point2::new(4.0, 0.0),
            ],
            false,
        )
        .unwrap();
        assert_eq!(even.min_radius(), 0.0);

        // 单段链没有死区
        let single = Chain::new(vec![Point2::origin(), Point2::new(5.0, 0.0)], false).unwrap();
        assert!((single.max_radius() - 5.0).abs() < EPSILON);
        assert_eq!(single.min_radius(), 0.0);
    }

    #[test]
    fn test_end_points() {
        let open = Chain::new(
            vec![
                Point2::new(1.0, 2.0),
                Point2::new(3.0, 4.0),
                Point2::new(5.0, 6.0),
            ],
            false,
        )
        .unwrap();
        assert_eq!(open.starting_point(), Point2::new(1.0, 2.0));
        assert_eq!(open.end_point(), Point2::new(5.0, 6.0));

        let closed = unit_square();
        assert_eq!(closed.end_point(), closed.starting_point());
    }

    #[test]
    fn test_vertex_mutation() {
        let mut chain = Chain::new(
            vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)],
            false,
        )
        .unwrap();

        chain.set_vertex(1, Point2::new(2.0, 2.0));
        assert_eq!(chain.vertex(1), Point2::new(2.0, 2.0));

        chain.insert_vertex(1, Point2::new(1.0, 1.0));
        assert_eq!(chain.vertex_count(), 3);
        assert_eq!(chain.vertex(1), Point2::new(1.0, 1.0));

        chain.remove_vertex(1).unwrap();
        chain.remove_vertex(1).unwrap();
        assert!(chain.remove_vertex(0).is_err());
        assert_eq!(chain.vertex_count(), 1);
    }

    #[test]
    fn test_distance_to_point() {
        let chain = Chain::new(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(10.0, 0.0),
                Point2::new(10.0, 10.0),
            ],
            false,
        )
        .unwrap();
        assert!((chain.distance_to_point(Point2::new(5.0, 3.0)) - 3.0).abs() < EPSILON);
        assert!((chain.distance_to_point(Point2::new(12.0, 5.0)) - 2.0).abs() < EPSILON);

        let point = Chain::new(vec![Point2::new(1.0, 1.0)], false).unwrap();
        assert!((point.distance_to_point(Point2::new(4.0, 5.0)) - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_serde_snapshot_roundtrip() {
        // 顶点序列加闭合标志即链的全部状态
        let square = unit_square();
        let json = serde_json::to_string(&square).unwrap();
        let restored: Chain = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.vertices(), square.vertices());
        assert_eq!(restored.is_closed(), square.is_closed());
        assert!((restored.signed_area() - square.signed_area()).abs() < EPSILON);
    }
}
