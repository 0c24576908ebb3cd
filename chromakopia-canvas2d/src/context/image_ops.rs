//! Image drawing, pixel readback, and PNG output for Canvas2dContext.

use super::Canvas2dContext;
use crate::error::{Canvas2dError, Canvas2dResult};
use crate::geometry::{CanvasImageDataRef, ImageCropParams};

impl Canvas2dContext {
    /// Draw a cropped region of straight-alpha image data into a destination rectangle.
    ///
    /// The source rectangle is clamped to the image; empty source or
    /// destination rectangles draw nothing.
    pub fn draw_image_data_cropped(
        &mut self,
        image: &CanvasImageDataRef<'_>,
        params: &ImageCropParams,
    ) -> Canvas2dResult<()> {
        log::debug!(target: "canvas", "drawImage {}x{} -> {} {} {} {}", image.width, image.height, params.dx, params.dy, params.dw, params.dh);
        let source = premultiplied_pixmap(image)?;

        let sx = params.sx.max(0.0);
        let sy = params.sy.max(0.0);
        let sw = params.sw.min(image.width as f32 - sx);
        let sh = params.sh.min(image.height as f32 - sy);
        if sw <= 0.0 || sh <= 0.0 || params.dw <= 0.0 || params.dh <= 0.0 {
            return Ok(());
        }

        let paint = tiny_skia::PixmapPaint {
            quality: tiny_skia::FilterQuality::Bicubic,
            ..Default::default()
        };

        // Map the source rectangle onto the destination, then apply the CTM
        let transform = self
            .state
            .transform
            .pre_translate(params.dx, params.dy)
            .pre_scale(params.dw / sw, params.dh / sh)
            .pre_translate(-sx, -sy);

        // Clip to the destination rectangle so neighbouring source pixels stay out
        let clip = tiny_skia::Rect::from_xywh(params.dx, params.dy, params.dw, params.dh)
            .map(tiny_skia::PathBuilder::from_rect)
            .and_then(|path| {
                let mut mask = tiny_skia::Mask::new(self.width, self.height)?;
                mask.fill_path(&path, tiny_skia::FillRule::Winding, true, self.state.transform);
                Some(mask)
            });

        self.pixmap
            .draw_pixmap(0, 0, source.as_ref(), &paint, transform, clip.as_ref());
        Ok(())
    }

    /// Get straight-alpha RGBA data for a region of the canvas.
    ///
    /// Pixels outside the canvas read as transparent black.
    pub fn get_image_data(&self, x: i32, y: i32, width: u32, height: u32) -> Vec<u8> {
        let mut data = vec![0u8; (width * height * 4) as usize];
        let pixels = self.pixmap.pixels();

        for dy in 0..height {
            let src_y = y + dy as i32;
            if src_y < 0 || src_y >= self.height as i32 {
                continue;
            }
            for dx in 0..width {
                let src_x = x + dx as i32;
                if src_x < 0 || src_x >= self.width as i32 {
                    continue;
                }
                let pixel = pixels[(src_y as u32 * self.width + src_x as u32) as usize].demultiply();
                let dst_idx = ((dy * width + dx) * 4) as usize;
                data[dst_idx..dst_idx + 4]
                    .copy_from_slice(&[pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()]);
            }
        }

        data
    }

    /// Export the canvas as PNG data.
    ///
    /// `ppi` sets the pixel density metadata and defaults to 72.
    pub fn to_png(&self, ppi: Option<f32>) -> Canvas2dResult<Vec<u8>> {
        let ppi = ppi.unwrap_or(72.0);

        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            // Pixel density is stored per meter
            let ppm = (ppi.max(0.0) / 0.0254).round() as u32;
            encoder.set_pixel_dims(Some(png::PixelDimensions {
                xppu: ppm,
                yppu: ppm,
                unit: png::Unit::Meter,
            }));

            let mut writer = encoder.write_header()?;
            let data = self.get_image_data(0, 0, self.width, self.height);
            writer.write_image_data(&data)?;
        }
        Ok(buf)
    }
}

/// Copy straight-alpha RGBA into a premultiplied pixmap.
fn premultiplied_pixmap(image: &CanvasImageDataRef<'_>) -> Canvas2dResult<tiny_skia::Pixmap> {
    let mismatch = || Canvas2dError::ImageDataMismatch {
        len: image.data.len(),
        width: image.width,
        height: image.height,
    };
    if image.data.len() != (image.width as usize) * (image.height as usize) * 4 {
        return Err(mismatch());
    }
    let mut pixmap = tiny_skia::Pixmap::new(image.width, image.height).ok_or_else(mismatch)?;
    for (dst, src) in pixmap
        .pixels_mut()
        .iter_mut()
        .zip(image.data.chunks_exact(4))
    {
        *dst = tiny_skia::ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
    }
    Ok(pixmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_config::FontConfig;
    use crate::geometry::RectParams;

    fn ctx(width: u32, height: u32) -> Canvas2dContext {
        let config = FontConfig {
            load_system_fonts: false,
            ..FontConfig::default()
        };
        Canvas2dContext::with_config(width, height, config).unwrap()
    }

    fn pixel(ctx: &Canvas2dContext, x: i32, y: i32) -> [u8; 4] {
        let data = ctx.get_image_data(x, y, 1, 1);
        [data[0], data[1], data[2], data[3]]
    }

    #[test]
    fn test_fill_rect_pixels() {
        let mut ctx = ctx(100, 100);
        ctx.set_fill_style("#ff0000").unwrap();
        ctx.fill_rect(&RectParams {
            x: 10.0,
            y: 10.0,
            width: 50.0,
            height: 50.0,
        });
        assert_eq!(pixel(&ctx, 30, 30), [255, 0, 0, 255]);
        assert_eq!(pixel(&ctx, 5, 5)[3], 0);
    }

    #[test]
    fn test_get_image_data_outside_is_transparent() {
        let mut ctx = ctx(4, 4);
        ctx.set_fill_style("#ffffff").unwrap();
        ctx.fill_rect(&RectParams::from_size(4.0, 4.0));
        let data = ctx.get_image_data(-2, -2, 4, 4);
        assert_eq!(&data[0..4], &[0, 0, 0, 0]);
        // (2, 2) in the region maps to canvas (0, 0)
        let idx = (2 * 4 + 2) * 4;
        assert_eq!(&data[idx..idx + 4], &[255, 255, 255, 255]);
    }

    #[test]
    fn test_draw_image_cropped_center_square() {
        // 4x2 image: left half red, right half blue; crop the centered 2x2 square
        let mut data = Vec::new();
        for _row in 0..2 {
            for col in 0..4 {
                if col < 2 {
                    data.extend_from_slice(&[255, 0, 0, 255]);
                } else {
                    data.extend_from_slice(&[0, 0, 255, 255]);
                }
            }
        }
        let image = CanvasImageDataRef {
            data: &data,
            width: 4,
            height: 2,
        };
        let mut ctx = ctx(40, 40);
        ctx.draw_image_data_cropped(
            &image,
            &ImageCropParams {
                sx: 1.0,
                sy: 0.0,
                sw: 2.0,
                sh: 2.0,
                dx: 0.0,
                dy: 0.0,
                dw: 40.0,
                dh: 40.0,
            },
        )
        .unwrap();

        let left = pixel(&ctx, 2, 20);
        let right = pixel(&ctx, 37, 20);
        assert!(left[0] > 200 && left[2] < 60, "left {:?}", left);
        assert!(right[2] > 200 && right[0] < 60, "right {:?}", right);
        assert_eq!(left[3], 255);
    }

    #[test]
    fn test_draw_image_rejects_short_data() {
        let mut ctx = ctx(10, 10);
        let image = CanvasImageDataRef {
            data: &[0, 0, 0],
            width: 1,
            height: 1,
        };
        let crop = ImageCropParams {
            sx: 0.0,
            sy: 0.0,
            sw: 1.0,
            sh: 1.0,
            dx: 0.0,
            dy: 0.0,
            dw: 10.0,
            dh: 10.0,
        };
        assert!(matches!(
            ctx.draw_image_data_cropped(&image, &crop),
            Err(Canvas2dError::ImageDataMismatch { .. })
        ));
    }

    #[test]
    fn test_to_png_signature_and_size() {
        let ctx = ctx(3, 2);
        let png_data = ctx.to_png(None).unwrap();
        assert_eq!(&png_data[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
        // IHDR width/height are big-endian at bytes 16..24
        assert_eq!(&png_data[16..20], &3u32.to_be_bytes());
        assert_eq!(&png_data[20..24], &2u32.to_be_bytes());
    }
}
