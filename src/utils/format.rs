// Path Display Utilities

use std::path::Path;

/// 家目录前缀缩写为 ~，其余路径原样显示
pub fn display_dir(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(rest) = path.strip_prefix(&home) {
            if rest.as_os_str().is_empty() {
                return "~".to_string();
            }
            return format!("~/{}", rest.display());
        }
    }
    path.display().to_string()
}
