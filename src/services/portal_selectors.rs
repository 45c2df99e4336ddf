//! 发票查询门户 (hoadondientu.gdt.gov.vn) 的页面元素

use crate::infrastructure::Locator;

/// 发票号码
pub const INVOICE_NUMBER_INPUT: Locator = Locator::css("#shdon");
/// 总金额
pub const AMOUNT_INPUT: Locator = Locator::css("#tgtttbso");
/// 发票符号
pub const INVOICE_CODE_INPUT: Locator = Locator::css("#khhdon");
/// 卖方税号
pub const TAX_ID_INPUT: Locator = Locator::css("#nbmst");
/// 验证码输入框
pub const CAPTCHA_INPUT: Locator = Locator::css("#cvalue");
/// 验证码图片
pub const CAPTCHA_IMAGE: Locator = Locator::css(r#"img[alt="captcha"]"#);
/// 刷新验证码按钮
pub const CAPTCHA_RELOAD_BUTTON: Locator = Locator::css("button.ant-btn-icon-only");
/// 查询按钮
pub const SUBMIT_BUTTON: Locator = Locator::with_text(r#"button[type="submit"]"#, "Tìm kiếm");
/// 验证码错误通知
pub const CAPTCHA_ERROR_NOTICE: Locator =
    Locator::with_text(".ant-notification-notice-message", "captcha không đúng");
/// 发票不存在提示
pub const NOT_FOUND_MESSAGE: Locator =
    Locator::with_text("p", "Không tồn tại hóa đơn có thông tin trùng khớp");
/// 加载动画
pub const LOADING_SPINNER: Locator = Locator::css(".ant-spin-spinning");
/// 首页弹窗关闭按钮
pub const MODAL_CLOSE_BUTTON: Locator = Locator::css(".ant-modal-close");
