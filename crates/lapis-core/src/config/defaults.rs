pub(super) fn default_name() -> String {
    "Lapis".to_string()
}
pub(super) fn default_log_level() -> String {
    "info".to_string()
}
pub(super) fn default_aliases() -> Vec<String> {
    ["lps", "六盘水", "l", "拉", "老婆说", "Lapis", "lapis", "lsp"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
pub(super) fn default_db_path() -> String {
    "~/.lapis/data/settings.db".to_string()
}
