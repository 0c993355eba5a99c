//! # 应用入口
//!
//! 负责初始化日志、注册插件、托管转换服务状态并暴露全部 Tauri 命令。

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use image_to_base64::converter::{self, ConverterServiceState};
use image_to_base64::settings;

fn main() {
    // 默认 info 级别，可通过 RUST_LOG 覆盖
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("⚙️ 图片转 Base64 工具启动");

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            use tauri::Manager;
            app.manage(ConverterServiceState::default());
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // 图片转换
            converter::commands::convert_image_file,
            converter::commands::convert_image_files,
            converter::commands::convert_image_bytes,
            converter::commands::convert_clipboard_image,
            // 结果列表
            converter::commands::list_results,
            converter::commands::remove_result,
            converter::commands::clear_results,
            converter::commands::result_count,
            // 渲染与复制
            converter::commands::render_output,
            converter::commands::copy_output,
            converter::commands::copy_all_as_json,
            // 配置与偏好
            converter::commands::get_converter_config,
            converter::commands::set_converter_config,
            settings::get_app_settings,
            settings::set_app_settings,
        ])
        .run(tauri::generate_context!())
        .expect("运行 Tauri 应用时出错");
}
