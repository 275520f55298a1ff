//! Fixed display strings. The published page is Thai-only.

pub const LOAD_ERROR: &str = "เกิดข้อผิดพลาดในการโหลดข้อมูล";
pub const LEADERS_HEADING: &str = "หัวหน้า";
pub const MEMBERS_HEADING: &str = "สมาชิก";
pub const NO_RESULTS: &str = "ไม่พบสมาชิก";
pub const PREV_LABEL: &str = "ก่อนหน้า";
pub const NEXT_LABEL: &str = "ถัดไป";

pub fn page_label(page: usize, total: usize) -> String {
    format!("หน้า {page} จาก {total}")
}
