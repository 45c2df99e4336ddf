//! 最小化的 OOXML 文档写入
//!
//! 每张图片一个段落，宽度固定 5 英寸并保持宽高比，图片后跟一个空段落。

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::{AppError, AppResult, FileError};

/// 1 英寸 = 914400 EMU
const EMU_PER_INCH: u64 = 914_400;
/// 图片显示宽度（英寸）
const IMAGE_WIDTH_INCHES: u64 = 5;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Default Extension="png" ContentType="image/png"/><Default Extension="jpeg" ContentType="image/jpeg"/><Default Extension="jpg" ContentType="image/jpeg"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// 嵌入文档的一张图片
struct EmbeddedImage {
    source: PathBuf,
    media_name: String,
    width_emu: u64,
    height_emu: u64,
}

/// 把图片按顺序写入 `output`
pub fn write_docx(output: &Path, images: &[PathBuf]) -> AppResult<()> {
    let embedded = images
        .iter()
        .enumerate()
        .map(|(idx, path)| embed_image(idx + 1, path))
        .collect::<AppResult<Vec<_>>>()?;

    let output_display = output.display().to_string();
    let archive_err = |source| {
        AppError::File(FileError::ArchiveFailed {
            path: output_display.clone(),
            source,
        })
    };

    let file = File::create(output)
        .map_err(|e| AppError::file_write_failed(output_display.clone(), e))?;
    let mut zip = ZipWriter::new(file);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut write_part = |name: &str, bytes: &[u8]| -> AppResult<()> {
        zip.start_file(name, options).map_err(archive_err)?;
        zip.write_all(bytes)
            .map_err(|e| AppError::file_write_failed(output_display.clone(), e))
    };

    write_part("[Content_Types].xml", CONTENT_TYPES_XML.as_bytes())?;
    write_part("_rels/.rels", ROOT_RELS_XML.as_bytes())?;
    write_part("word/document.xml", document_xml(&embedded).as_bytes())?;
    write_part(
        "word/_rels/document.xml.rels",
        document_rels_xml(&embedded).as_bytes(),
    )?;

    for image in &embedded {
        let bytes = std::fs::read(&image.source)
            .map_err(|e| AppError::file_read_failed(image.source.display().to_string(), e))?;
        write_part(&format!("word/media/{}", image.media_name), &bytes)?;
        debug!("已嵌入图片: {}", image.source.display());
    }

    zip.finish().map_err(archive_err)?;
    Ok(())
}

fn embed_image(index: usize, path: &Path) -> AppResult<EmbeddedImage> {
    let (width, height) = image::image_dimensions(path)
        .map_err(|e| AppError::image_failed(path.display().to_string(), e))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_else(|| "png".to_string());

    let width_emu = IMAGE_WIDTH_INCHES * EMU_PER_INCH;
    let height_emu = if width == 0 {
        0
    } else {
        width_emu * u64::from(height) / u64::from(width)
    };

    Ok(EmbeddedImage {
        source: path.to_path_buf(),
        media_name: format!("image{}.{}", index, extension),
        width_emu,
        height_emu,
    })
}

fn document_rels_xml(images: &[EmbeddedImage]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (idx, image) in images.iter().enumerate() {
        xml.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/{}"/>"#,
            idx + 1,
            image.media_name
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

fn document_xml(images: &[EmbeddedImage]) -> String {
    let mut body = String::new();
    for (idx, image) in images.iter().enumerate() {
        let id = idx + 1;
        body.push_str(&format!(
            concat!(
                r#"<w:p><w:r><w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0">"#,
                r#"<wp:extent cx="{cx}" cy="{cy}"/><wp:docPr id="{id}" name="Picture {id}"/>"#,
                r#"<wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr>"#,
                r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
                r#"<pic:pic><pic:nvPicPr><pic:cNvPr id="{id}" name="{name}"/><pic:cNvPicPr/></pic:nvPicPr>"#,
                r#"<pic:blipFill><a:blip r:embed="rId{id}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
                r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
                r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr></pic:pic>"#,
                r#"</a:graphicData></a:graphic></wp:inline></w:drawing></w:r></w:p><w:p/>"#,
            ),
            cx = image.width_emu,
            cy = image.height_emu,
            id = id,
            name = image.media_name,
        ));
    }

    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
            r#"xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" "#,
            r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
            r#"xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
            r#"<w:body>{body}<w:sectPr><w:pgSz w:w="11906" w:h="16838"/>"#,
            r#"<w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/>"#,
            r#"</w:sectPr></w:body></w:document>"#,
        ),
        body = body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_keeps_aspect_ratio() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        image::RgbImage::new(200, 100).save(&path).unwrap();

        let embedded = embed_image(1, &path).unwrap();
        assert_eq!(embedded.width_emu, 5 * EMU_PER_INCH);
        assert_eq!(embedded.height_emu, 5 * EMU_PER_INCH / 2);
        assert_eq!(embedded.media_name, "image1.png");
    }

    #[test]
    fn test_empty_document_is_valid_shell() {
        let xml = document_xml(&[]);
        assert!(xml.contains("<w:body><w:sectPr>"));
        assert!(!xml.contains("<w:drawing>"));
    }
}
