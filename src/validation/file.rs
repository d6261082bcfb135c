use image::ImageFormat;

use crate::models::requests::restaurant::UploadedFile;

/// Around 2Mb.
pub const MAX_FILE_SIZE: usize = 2_000_000;

/// The upload must decode as one of the accepted image formats. The check
/// sniffs the actual bytes, the client-supplied content type is not trusted.
pub fn check_file_is_image(file: &UploadedFile) -> bool {
    matches!(
        image::guess_format(&file.data),
        Ok(ImageFormat::Jpeg) | Ok(ImageFormat::Png)
    )
}

pub fn check_file_max_size(file: &UploadedFile, max_bytes: usize) -> bool {
    file.data.len() <= max_bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn png_file(len: usize) -> UploadedFile {
        let mut data = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        data.resize(len.max(data.len()), 0);
        UploadedFile {
            file_name: Some("hero.png".to_string()),
            content_type: Some("image/png".to_string()),
            data,
        }
    }

    pub(crate) fn jpeg_file(len: usize) -> UploadedFile {
        let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0];
        data.resize(len.max(data.len()), 0);
        UploadedFile {
            file_name: Some("logo.jpg".to_string()),
            content_type: Some("image/jpeg".to_string()),
            data,
        }
    }

    #[test]
    fn png_and_jpeg_are_accepted() {
        assert!(check_file_is_image(&png_file(64)));
        assert!(check_file_is_image(&jpeg_file(64)));
    }

    #[test]
    fn other_formats_are_rejected() {
        let gif = UploadedFile {
            file_name: Some("hero.gif".to_string()),
            content_type: Some("image/gif".to_string()),
            data: b"GIF89a\x00\x00".to_vec(),
        };
        let text = UploadedFile {
            file_name: Some("hero.txt".to_string()),
            content_type: Some("text/plain".to_string()),
            data: b"definitely not an image".to_vec(),
        };

        assert!(!check_file_is_image(&gif));
        assert!(!check_file_is_image(&text));
    }

    #[test]
    fn size_limit_is_inclusive() {
        assert!(check_file_max_size(&png_file(MAX_FILE_SIZE), MAX_FILE_SIZE));
        assert!(!check_file_max_size(&png_file(MAX_FILE_SIZE + 1), MAX_FILE_SIZE));
    }
}
