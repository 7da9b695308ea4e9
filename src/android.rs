//! JNI bindings for Android.
//!
//! These functions are called from Kotlin via the JNI bridge.

use jni::objects::{JClass, JString};
use jni::sys::jstring;
use jni::JNIEnv;

use crate::{render_json, RenderConfig};

/// Render a JSON song to tablature.
///
/// Called from Kotlin as:
///   external fun renderJson(songJson: String, configJson: String?): String?
#[no_mangle]
pub extern "system" fn Java_com_tablib_app_TabLib_renderJson(
    mut env: JNIEnv,
    _class: JClass,
    song_json: JString,
    config_json: JString,
) -> jstring {
    let song: String = match env.get_string(&song_json) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };

    let config = if config_json.is_null() {
        RenderConfig::default()
    } else {
        let json: String = match env.get_string(&config_json) {
            Ok(s) => s.into(),
            Err(_) => return std::ptr::null_mut(),
        };
        match RenderConfig::from_json(&json) {
            Ok(config) => config,
            Err(_) => return std::ptr::null_mut(),
        }
    };

    match render_json(&song, &config) {
        Ok(tab) => match env.new_string(&tab) {
            Ok(js) => js.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
        Err(_) => std::ptr::null_mut(),
    }
}
