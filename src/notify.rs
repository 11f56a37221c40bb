//! Completion side effects: OS notification and alert sound.
//!
//! Both are fire-and-forget. Failures (no notification daemon, missing sound
//! files, denied permissions) are swallowed here and never reach the timer.

use notify_rust::{Notification, Urgency};

use crate::settings::NotificationSound;

pub fn notify(title: &str, body: &str) {
    let _ = Notification::new()
        .summary(title)
        .body(body)
        .appname("focusglow")
        .icon("alarm-clock")
        .urgency(Urgency::Critical)
        .show();
}

/// Play the configured alert tone through whichever system player exists.
pub fn play_sound(sound: NotificationSound) {
    let candidates: &[(&str, &str)] = match sound {
        NotificationSound::Alarm => &[
            ("paplay", "/usr/share/sounds/freedesktop/stereo/alarm-clock-elapsed.oga"),
            ("paplay", "/usr/share/sounds/freedesktop/stereo/complete.oga"),
            ("aplay", "/usr/share/sounds/sound-icons/guitar-11.wav"),
        ],
        NotificationSound::Bell => &[
            ("paplay", "/usr/share/sounds/freedesktop/stereo/bell.oga"),
            ("paplay", "/usr/share/sounds/freedesktop/stereo/message.oga"),
            ("aplay", "/usr/share/sounds/sound-icons/xylofon.wav"),
        ],
        NotificationSound::None => return,
    };

    let candidates = candidates.to_vec();
    std::thread::spawn(move || {
        for (cmd, file) in candidates {
            if std::path::Path::new(file).exists() {
                let _ = std::process::Command::new(cmd)
                    .arg(file)
                    .stdout(std::process::Stdio::null())
                    .stderr(std::process::Stdio::null())
                    .spawn();
                break;
            }
        }
    });
}
