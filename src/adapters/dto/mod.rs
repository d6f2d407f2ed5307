pub mod file_dto;
