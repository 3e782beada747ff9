pub mod tables;
pub mod workbook;
