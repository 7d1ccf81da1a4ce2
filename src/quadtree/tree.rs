//! Region QuadTree over a square grayscale image.

use image::{GrayImage, Luma};

/// A square block of the image, either a uniform leaf or split into four.
#[derive(Debug, Clone, PartialEq)]
pub enum QuadNode {
    Leaf {
        x: u32,
        y: u32,
        size: u32,
        value: u8,
    },
    /// Children are top-left, top-right, bottom-left, bottom-right.
    Branch {
        x: u32,
        y: u32,
        size: u32,
        children: Box<[QuadNode; 4]>,
    },
}

impl QuadNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self, QuadNode::Leaf { .. })
    }

    fn count(&self) -> usize {
        match self {
            QuadNode::Leaf { .. } => 1,
            QuadNode::Branch { children, .. } => {
                1 + children.iter().map(QuadNode::count).sum::<usize>()
            }
        }
    }

    fn paint(&self, out: &mut GrayImage) {
        match self {
            QuadNode::Leaf { x, y, size, value } => {
                for px in *x..x + size {
                    for py in *y..y + size {
                        out.put_pixel(px, py, Luma([*value]));
                    }
                }
            }
            QuadNode::Branch { children, .. } => {
                for child in children.iter() {
                    child.paint(out);
                }
            }
        }
    }
}

/// QuadTree compression of one image at one variance threshold.
#[derive(Debug, Clone)]
pub struct QuadTree {
    root: QuadNode,
    size: u32,
    threshold: f64,
}

impl QuadTree {
    /// Build the tree for a square image whose side is a power of two.
    ///
    /// A block stays whole when its pixel variance is at most `threshold`.
    pub fn build(image: &GrayImage, threshold: f64) -> Self {
        let size = image.width();
        debug_assert_eq!(image.width(), image.height());
        let root = Self::build_node(image, threshold, 0, 0, size);
        Self {
            root,
            size,
            threshold,
        }
    }

    fn build_node(image: &GrayImage, threshold: f64, x: u32, y: u32, size: u32) -> QuadNode {
        let block = BlockStats::of(image, x, y, size);
        if size <= 1 || block.variance() <= threshold {
            return QuadNode::Leaf {
                x,
                y,
                size,
                value: block.mean(),
            };
        }

        let half = size / 2;
        QuadNode::Branch {
            x,
            y,
            size,
            children: Box::new([
                Self::build_node(image, threshold, x, y, half),
                Self::build_node(image, threshold, x + half, y, half),
                Self::build_node(image, threshold, x, y + half, half),
                Self::build_node(image, threshold, x + half, y + half, half),
            ]),
        }
    }

    pub fn root(&self) -> &QuadNode {
        &self.root
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Total nodes, leaves and branches alike.
    pub fn node_count(&self) -> usize {
        self.root.count()
    }

    /// Nodes per pixel; below 1 means the tree is smaller than the raw image.
    pub fn compression_ratio(&self) -> f64 {
        self.node_count() as f64 / (self.size as f64 * self.size as f64)
    }

    /// Image with every leaf block filled by its mean value.
    pub fn reconstruct(&self) -> GrayImage {
        let mut out = GrayImage::new(self.size, self.size);
        self.root.paint(&mut out);
        out
    }
}

/// Sum and sum of squares of a block.
struct BlockStats {
    sum: u64,
    sum_sq: u64,
    n: u64,
}

impl BlockStats {
    fn of(image: &GrayImage, x: u32, y: u32, size: u32) -> Self {
        let mut sum = 0u64;
        let mut sum_sq = 0u64;
        for px in x..x + size {
            for py in y..y + size {
                let v = image.get_pixel(px, py)[0] as u64;
                sum += v;
                sum_sq += v * v;
            }
        }
        Self {
            sum,
            sum_sq,
            n: size as u64 * size as u64,
        }
    }

    fn variance(&self) -> f64 {
        let n = self.n as f64;
        let sum = self.sum as f64;
        (self.sum_sq as f64 - sum * sum / n) / n
    }

    /// Integer mean, truncated.
    fn mean(&self) -> u8 {
        (self.sum / self.n) as u8
    }
}
