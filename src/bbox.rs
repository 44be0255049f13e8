use nalgebra as na;
use serde::{Deserialize, Serialize};
use serde_derive::{Deserialize, Serialize};
use std::marker::PhantomData;

pub trait BBoxFormat: std::fmt::Debug {}

/// Left-top-right-bottom format, contains min and max corners
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Ltrb;
impl BBoxFormat for Ltrb {}

/// X-y-width-height format, contains coordinates of the center of bbox and width-height
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Xywh;
impl BBoxFormat for Xywh {}

/// Pixel-space box, typed by its coordinate layout.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BBox<F: BBoxFormat + Serialize + Deserialize<'static> + PartialEq>(
    [f32; 4],
    PhantomData<F>,
);

impl<F: BBoxFormat + Serialize + Deserialize<'static> + PartialEq> BBox<F> {
    #[inline]
    pub fn as_slice(&self) -> &[f32; 4] {
        &self.0
    }
}

impl BBox<Ltrb> {
    #[inline]
    pub fn ltrb(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Self {
        BBox([x_min, y_min, x_max, y_max], Default::default())
    }

    #[inline(always)]
    pub fn left(&self) -> f32 {
        self.0[0]
    }

    #[inline(always)]
    pub fn top(&self) -> f32 {
        self.0[1]
    }

    #[inline(always)]
    pub fn right(&self) -> f32 {
        self.0[2]
    }

    #[inline(always)]
    pub fn bottom(&self) -> f32 {
        self.0[3]
    }

    /// Center of the box, the position trackers record per frame.
    #[inline]
    pub fn centroid(&self) -> na::Point2<f32> {
        na::Point2::new(
            (self.left() + self.right()) / 2.0,
            (self.top() + self.bottom()) / 2.0,
        )
    }

    #[inline]
    pub fn as_xywh(&self) -> BBox<Xywh> {
        self.into()
    }
}

impl BBox<Xywh> {
    #[inline]
    pub fn xywh(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        BBox([cx, cy, w, h], Default::default())
    }

    #[inline]
    pub fn as_ltrb(&self) -> BBox<Ltrb> {
        self.into()
    }

    #[inline(always)]
    pub fn cx(&self) -> f32 {
        self.0[0]
    }

    #[inline(always)]
    pub fn cy(&self) -> f32 {
        self.0[1]
    }

    #[inline(always)]
    pub fn width(&self) -> f32 {
        self.0[2]
    }

    #[inline(always)]
    pub fn height(&self) -> f32 {
        self.0[3]
    }
}

impl<'a> From<&'a BBox<Ltrb>> for BBox<Xywh> {
    #[inline]
    fn from(v: &'a BBox<Ltrb>) -> Self {
        let c = v.centroid();

        Self(
            [c.x, c.y, v.right() - v.left(), v.bottom() - v.top()],
            Default::default(),
        )
    }
}

impl<'a> From<&'a BBox<Xywh>> for BBox<Ltrb> {
    #[inline]
    fn from(v: &'a BBox<Xywh>) -> Self {
        let (hw, hh) = (v.width() / 2.0, v.height() / 2.0);

        Self(
            [v.cx() - hw, v.cy() - hh, v.cx() + hw, v.cy() + hh],
            Default::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centroid_of_ltrb() {
        let bbox = BBox::ltrb(120.0, 150.0, 170.0, 200.0);
        assert_eq!(bbox.centroid(), na::Point2::new(145.0, 175.0));
    }

    #[test]
    fn xywh_to_ltrb() {
        let bbox = BBox::xywh(145.0, 175.0, 50.0, 50.0).as_ltrb();
        assert_eq!(bbox, BBox::ltrb(120.0, 150.0, 170.0, 200.0));
        assert_eq!(bbox.as_xywh().width(), 50.0);
    }
}
