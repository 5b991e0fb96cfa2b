//! Localized texts shown to the user when a request fails.

/// 连接失败、503、系统错误这三种情况需要给用户展示本地化文本，其它情况直接使用服务端返回的 message
pub trait ErrorMessages: Send + Sync {
    fn connection_error_text(&self) -> String;
    fn http503_text(&self) -> String;
    fn system_error_text(&self, detail: Option<&str>) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMessages;

impl ErrorMessages for DefaultMessages {
    fn connection_error_text(&self) -> String {
        "Unable to connect to the server. Please check your internet connection.".to_owned()
    }

    fn http503_text(&self) -> String {
        "The service is temporarily unavailable. Please try again later.".to_owned()
    }

    fn system_error_text(&self, detail: Option<&str>) -> String {
        match detail {
            Some(d) if !d.is_empty() => format!("A system error occurred: {d}"),
            _ => "A system error occurred.".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IndonesianMessages;

impl ErrorMessages for IndonesianMessages {
    fn connection_error_text(&self) -> String {
        "Tidak dapat terhubung ke server. Periksa koneksi internet Anda.".to_owned()
    }

    fn http503_text(&self) -> String {
        "Layanan sedang tidak tersedia. Silakan coba beberapa saat lagi.".to_owned()
    }

    fn system_error_text(&self, detail: Option<&str>) -> String {
        match detail {
            Some(d) if !d.is_empty() => format!("Terjadi kesalahan sistem: {d}"),
            _ => "Terjadi kesalahan sistem.".to_owned(),
        }
    }
}

#[test]
fn system_text_with_and_without_detail() {
    let m = DefaultMessages;
    assert_eq!(m.system_error_text(None), "A system error occurred.");
    assert_eq!(m.system_error_text(Some("")), "A system error occurred.");
    assert_eq!(
        m.system_error_text(Some("boom")),
        "A system error occurred: boom"
    );
    assert!(IndonesianMessages.system_error_text(Some("x")).ends_with(": x"));
}
