mod photo_dto;

pub use photo_dto::{
    content_type_from_extension, file_extension, human_readable_size, is_media_content_type,
    PhotoDto, UploadPhotoDto, UploadPhotoResponseDto, MAX_UPLOAD_SIZE,
};
