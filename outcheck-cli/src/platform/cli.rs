//! CLI 格式化输出
//!
//! 结论和证据写到 stdout，诊断信息写到 stderr。

use outcheck_api::{OutcheckError, RunReport};

/// 打印比较结果
pub fn print_report(report: &RunReport, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}

/// 打印致命错误
pub fn print_error(e: &OutcheckError, json: bool) {
    let report = e.to_report();
    if json {
        if let Ok(text) = serde_json::to_string(&report) {
            eprintln!("{}", text);
            return;
        }
    }
    eprintln!("Error: {}", report.message);
}
