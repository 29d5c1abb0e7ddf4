//! Fixed user-facing reply texts.

pub const UNAUTHORIZED: &str = "您无权执行该指令";
pub const MALFORMED_ARGUMENT: &str = "参数输入有误";
pub const SETTINGS_CHANGED: &str = "设置变更成功！";
pub const SETTINGS_SELF_DISABLE: &str = "设置指令无法在聊天中关闭";
pub const UNEXPECTED_ERROR: &str = "出现了未知错误，请稍后再试";

pub const HELP: &str = "Lapis 指令帮助\n\
\n\
lps help — 显示本帮助\n\
lps settings — 查看本群设置\n\
lps settings <项>.<子项> <true|false> — 修改本群设置（需群主、管理员）\n\
\n\
开启轻量指令（litecommand.1）后，可省略 lps 前缀直接发送指令。";
