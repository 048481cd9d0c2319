use chrono::Local;

use crate::config::LogSetting;

/// 初始化日誌：stdout，加上選配的檔案輸出
pub fn setup_logger(setting: &LogSetting) -> Result<(), fern::InitError> {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(setting.level_filter())
        .chain(std::io::stdout());

    if let Some(file) = &setting.file {
        dispatch = dispatch.chain(fern::log_file(file)?);
    }
    dispatch.apply()?;
    Ok(())
}
