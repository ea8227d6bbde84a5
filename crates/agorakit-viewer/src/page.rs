//! Viewer page rendering.
//!
//! Produces a self-contained HTML page that joins a channel as audience
//! through Agora's published Web SDK (loaded from Agora's CDN — the SDK
//! itself is out of scope here) and plays whatever the hosts publish,
//! with a per-host stats readout (resolution, bitrate, packet loss,
//! freezes, latency and network quality, refreshed every 5 seconds).

use agorakit_models::{AppId, ChannelName};
use serde_json::json;

use crate::error::ViewerError;

/// Minimum plausible length of a signed credential string.
const MIN_TOKEN_LEN: usize = 51;

/// Check that `token` has the shape of a signed Agora credential:
/// longer than 50 characters and standard-base64 alphabet only.
///
/// This is a shape check, not verification — only Agora's servers hold
/// the certificate needed to verify.
pub fn validate_token(token: &str) -> Result<(), ViewerError> {
    if token.len() < MIN_TOKEN_LEN {
        return Err(ViewerError::InvalidToken(
            "too short to be a signed credential".into(),
        ));
    }
    let ok = token
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/' || b == b'=');
    if !ok {
        return Err(ViewerError::InvalidToken(
            "contains characters outside the base64 alphabet".into(),
        ));
    }
    Ok(())
}

/// Render the viewer page for validated inputs.
///
/// The join parameters are injected as one JSON object, so nothing
/// user-supplied is ever spliced into a script string.
pub fn render(app_id: &AppId, channel: &ChannelName, token: &str) -> String {
    let config = json!({
        "appId": app_id.as_str(),
        "channel": channel.as_str(),
        "token": token,
    });

    format!(
        r##"<!DOCTYPE html>
<html>
<head>
    <title>agorakit viewer</title>
    <script src="https://download.agora.io/sdk/release/AgoraRTC_N.js"></script>
    <style>
        #video {{ width: 100%; height: 500px; background: black; }}
        #error-log {{ color: red; }}
        #stats-log {{ color: green; font-family: monospace; }}
    </style>
</head>
<body>
    <div id="video"></div>
    <div id="error-log"></div>
    <div id="stats-log"></div>
    <script>
        const CONFIG = {config};
        let client;
        let subscribedUsers = [];
        let statsTimer;

        async function startViewer() {{
            try {{
                client = AgoraRTC.createClient({{ mode: 'live', codec: 'vp8' }});
                await client.join(CONFIG.appId, CONFIG.channel, CONFIG.token, null);
                await client.setClientRole('audience');
                client.enableDualStream();

                client.on('user-published', async (user, mediaType) => {{
                    await client.subscribe(user, mediaType);
                    if (mediaType === 'video') {{
                        subscribedUsers.push(user.uid);
                        await client.setRemoteVideoStreamType(user.uid, 1);
                        user.videoTrack.play('video', {{ playoutDelayHint: 100 }});
                    }} else if (mediaType === 'audio') {{
                        user.audioTrack.play();
                    }}
                    initStats();
                }});

                client.on('user-unpublished', (user) => {{
                    subscribedUsers = subscribedUsers.filter((uid) => uid !== user.uid);
                }});
            }} catch (err) {{
                document.getElementById('error-log').textContent =
                    'Join failed: ' + err.message;
            }}
        }}

        function initStats() {{
            if (!client || statsTimer) return;
            statsTimer = setInterval(() => {{
                const networkQuality = client.getRemoteNetworkQuality();
                const videoStats = client.getRemoteVideoStats();
                let statsText = 'Stream Stats:\n';
                subscribedUsers.forEach((uid) => {{
                    const vStats = videoStats[uid] || {{}};
                    const nQuality = networkQuality[uid] || {{}};
                    statsText += `UID ${{uid}}:\n`;
                    statsText += `  Resolution: ${{vStats.receiveResolutionWidth || 'N/A'}}x${{vStats.receiveResolutionHeight || 'N/A'}}\n`;
                    statsText += `  Data Rate: ${{vStats.receiveBitrate || 'N/A'}} kbps\n`;
                    statsText += `  Packet Loss: ${{vStats.packetLossRate || 'N/A'}}%\n`;
                    statsText += `  Dropped Frames: ${{vStats.totalFrozenTime || 'N/A'}}s frozen, ${{vStats.freezeRate || 'N/A'}}% freeze rate\n`;
                    statsText += `  Latency: ${{vStats.endToEndDelay || 'N/A'}}ms, Jitter: ${{vStats.jitter || 'N/A'}}ms\n`;
                    statsText += `  Network Quality: Uplink ${{nQuality.uplinkNetworkQuality || 'N/A'}}, Downlink ${{nQuality.downlinkNetworkQuality || 'N/A'}}\n`;
                }});
                document.getElementById('stats-log').innerText = statsText;
            }}, 5000);
        }}

        startViewer();
    </script>
</body>
</html>
"##
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
