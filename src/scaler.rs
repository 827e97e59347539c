/// Precomputed source row/column for every destination pixel.
pub struct ScaleLut {
    src_x: Vec<usize>,
    src_y: Vec<usize>,
}

impl ScaleLut {
    pub fn empty() -> Self {
        Self {
            src_x: Vec::new(),
            src_y: Vec::new(),
        }
    }

    pub fn dst_size(&self) -> (usize, usize) {
        (self.src_x.len(), self.src_y.len())
    }
}

/// Nearest-neighbour mapping; keeps the blocky look of the low-res framebuffer.
pub fn build_scale_lut(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> ScaleLut {
    ScaleLut {
        src_x: nearest_indices(dst_w, src_w),
        src_y: nearest_indices(dst_h, src_h),
    }
}

fn nearest_indices(dst: usize, src: usize) -> Vec<usize> {
    if src == 0 {
        return vec![0; dst];
    }
    (0..dst)
        // Sample at the destination pixel centre
        .map(|d| (((2 * d + 1) * src) / (2 * dst)).min(src - 1))
        .collect()
}

/// Stretches `src` (rows of `sw` pixels) into `dst` (rows of `dw` pixels).
pub fn blit_nearest(dst: &mut [u32], dw: usize, src: &[u32], sw: usize, lut: &ScaleLut) {
    if dw == 0 {
        return;
    }
    for (dst_row, &sy) in dst.chunks_exact_mut(dw).zip(&lut.src_y) {
        let src_row = &src[sy * sw..(sy + 1) * sw];
        for (px, &sx) in dst_row.iter_mut().zip(&lut.src_x) {
            *px = src_row[sx];
        }
    }
}
