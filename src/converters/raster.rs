//! # 图像转换
//!
//! 解码后直接编码到目标容器，格式由输出扩展名推断。
//! 带 alpha 通道的图像写 JPEG 前先压平为不透明 RGB；
//! 写 GIF 前把 16 位、浮点和灰度图像降为 8 位 RGB(A)。
//!
//! ## 依赖关系
//! - 被 `converters/mod.rs` 调用
//! - 使用 `image` crate

use crate::error::Result;

use image::{DynamicImage, ImageFormat};
use std::path::Path;

/// 图像重新编码
pub fn convert_image(input_path: &Path, output_path: &Path) -> Result<()> {
    let img = image::open(input_path)?;
    let format = ImageFormat::from_path(output_path)?;

    let img = prepare_for(img, format);
    img.save_with_format(output_path, format)?;
    Ok(())
}

/// 针对目标格式调整像素布局
fn prepare_for(img: DynamicImage, format: ImageFormat) -> DynamicImage {
    match format {
        // JPEG 编码器只接受 8 位灰度或 RGB
        ImageFormat::Jpeg => match img {
            DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => img,
            other => DynamicImage::ImageRgb8(other.to_rgb8()),
        },
        // GIF 编码器只接受 8 位 RGB/RGBA
        ImageFormat::Gif => match img {
            DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => img,
            other if other.color().has_alpha() => DynamicImage::ImageRgba8(other.to_rgba8()),
            other => DynamicImage::ImageRgb8(other.to_rgb8()),
        },
        _ => img,
    }
}
