// setter.rs — 系统壁纸设置模块
// 通过 std::process::Command 调用外部壁纸工具（默认 feh）

use crate::error::AppError;
use rust_i18n::t;
use std::path::Path;
use std::process::Command;

/// 壁纸设置能力的窄接口
///
/// 流程其余部分只依赖 apply()，换平台时只需提供另一个实现，
/// 不用改动抓取与下载逻辑。
pub trait WallpaperSetter {
    /// 将指定路径的图片应用为桌面壁纸
    fn apply(&self, path: &Path) -> Result<(), AppError>;
}

/// 调用外部命令的设置器：`<program> <mode_flag> <path>`
pub struct CommandSetter {
    /// 外部工具名，在 $PATH 中查找
    program: String,
    /// 填充模式参数（如 feh 的 --bg-fill）
    mode_flag: String,
}

impl CommandSetter {
    /// 默认工具：feh，以 --bg-fill 平铺填充整个屏幕
    pub fn feh() -> Self {
        Self {
            program: "feh".to_string(),
            mode_flag: "--bg-fill".to_string(),
        }
    }

    /// 实际调用形式的展示字符串，配置输出与真实命令共用一处定义
    pub fn describe(&self) -> String {
        format!("{} {}", self.program, self.mode_flag)
    }

    #[cfg(test)]
    fn with_program(program: &str, mode_flag: &str) -> Self {
        Self {
            program: program.to_string(),
            mode_flag: mode_flag.to_string(),
        }
    }
}

impl WallpaperSetter for CommandSetter {
    fn apply(&self, path: &Path) -> Result<(), AppError> {
        // 打印正在设置哪张图
        println!("  -> {}", path.display());

        // .output() 同步执行命令，等待完成，捕获 stdout 和 stderr
        let output = Command::new(&self.program)
            .arg(&self.mode_flag)
            .arg(path)
            .output()
            .map_err(|e| AppError::ExternalTool(format!("{}: {}", self.program, e)))?;

        if output.status.success() {
            Ok(())
        } else {
            // 非零退出码视为整次运行失败，把 stderr 带进错误信息
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(AppError::ExternalTool(format!(
                "{} ({}): {}",
                t!("error_set_failed"),
                self.program,
                stderr.trim()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn nonzero_exit_is_external_tool_error() {
        // `false` 忽略参数并以退出码 1 结束
        let setter = CommandSetter::with_program("false", "--bg-fill");
        let err = setter.apply(Path::new("/tmp/whatever.jpg")).unwrap_err();
        assert!(matches!(err, AppError::ExternalTool(_)));
    }

    #[test]
    fn missing_program_is_external_tool_error() {
        let setter = CommandSetter::with_program("apodwall-no-such-tool", "--bg-fill");
        let err = setter.apply(Path::new("/tmp/whatever.jpg")).unwrap_err();
        assert!(matches!(err, AppError::ExternalTool(_)));
    }

    #[test]
    fn describe_matches_feh_invocation() {
        assert_eq!(CommandSetter::feh().describe(), "feh --bg-fill");
    }

    #[test]
    fn zero_exit_is_ok() {
        let setter = CommandSetter::with_program("true", "--bg-fill");
        assert!(setter.apply(Path::new("/tmp/whatever.jpg")).is_ok());
    }
}
