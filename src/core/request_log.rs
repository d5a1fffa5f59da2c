use crate::core::RequestLogEntry;

pub const GREEN: u8 = 32;
pub const RED: u8 = 31;
pub const WHITE: u8 = 37;

/// 以 ANSI 色碼包住一段文字
pub fn color(code: u8, value: impl std::fmt::Display) -> String {
    format!("\x1b[{}m{}\x1b[0m", code, value)
}

/// `METHOD STATUS PATH [Nms]`，狀態碼 2xx 綠色、其他紅色，整行白色
pub fn format_request_line(entry: &RequestLogEntry) -> String {
    let status_color = if entry.is_success() { GREEN } else { RED };
    let status = color(status_color, entry.status_code);
    color(
        WHITE,
        format!(
            "{} {} {} [{}ms]",
            entry.method, status, entry.path, entry.elapsed_ms
        ),
    )
}

pub fn print_request_line(entry: &RequestLogEntry) {
    println!("{}", format_request_line(entry));
}
