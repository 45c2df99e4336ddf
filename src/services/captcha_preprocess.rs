//! 验证码图片预处理
//!
//! 提交识别前：放大 3 倍（Lanczos3）→ 灰度 → 自动对比度 → 3×3 中值滤波。
//! 纯函数，同样的输入总是得到逐像素相同的输出。

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, GrayImage, ImageFormat, Luma, RgbImage};
use imageproc::contrast::stretch_contrast;
use imageproc::filter::median_filter;
use std::io::Cursor;

/// 放大倍数
pub const UPSCALE_FACTOR: u32 = 3;

/// 完整的预处理流水线
pub fn preprocess_captcha(img: &DynamicImage) -> GrayImage {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return to_gray_601(&img.to_rgb8());
    }

    let upscaled = img.resize_exact(
        width * UPSCALE_FACTOR,
        height * UPSCALE_FACTOR,
        FilterType::Lanczos3,
    );
    let gray = to_gray_601(&upscaled.to_rgb8());
    let stretched = autocontrast(&gray);
    median_filter_3x3(&stretched)
}

/// ITU-R 601-2 亮度：L = R·299/1000 + G·587/1000 + B·114/1000
///
/// 定点计算，与 PIL 的 `convert("L")` 逐像素一致。
pub fn to_gray_601(img: &RgbImage) -> GrayImage {
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        let [r, g, b] = img.get_pixel(x, y).0;
        let luma = (u32::from(r) * 19595 + u32::from(g) * 38470 + u32::from(b) * 7471 + 0x8000) >> 16;
        Luma([luma as u8])
    })
}

/// 线性拉伸灰度范围到 [0, 255]，纯色图原样返回
pub fn autocontrast(img: &GrayImage) -> GrayImage {
    let (lo, hi) = img
        .pixels()
        .fold((u8::MAX, u8::MIN), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])));
    if hi <= lo {
        return img.clone();
    }
    stretch_contrast(img, lo, hi, u8::MIN, u8::MAX)
}

/// 3×3 中值滤波，边缘像素按最近邻复制
pub fn median_filter_3x3(img: &GrayImage) -> GrayImage {
    median_filter(img, 1, 1)
}

/// 编码为 PNG 字节
pub fn encode_png(img: &GrayImage) -> image::ImageResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}
