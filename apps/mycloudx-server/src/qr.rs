//! QR code page for connecting a phone to the server.
//!
//! Encodes the server's base URL as a PNG QR code and embeds it, base64
//! encoded, in a small standalone HTML page.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::{ImageBuffer, Luma};
use qrcode::QrCode;

/// Pixels per QR module.
const PNG_MODULE_SIZE: u32 = 8;

/// Quiet zone around the code, in modules.
const PNG_QUIET_ZONE: u32 = 2;

/// Render `data` as a grayscale PNG QR code.
///
/// # Errors
/// Returns an error if the data does not fit in a QR code or PNG encoding fails.
pub fn generate_png_qr_bytes(data: &str) -> anyhow::Result<Vec<u8>> {
    let code = QrCode::new(data.as_bytes())?;
    let modules = code.to_colors();
    let qr_width = code.width();

    let quiet_zone_pixels = PNG_QUIET_ZONE * PNG_MODULE_SIZE;
    let qr_pixels = qr_width as u32 * PNG_MODULE_SIZE;
    let image_size = qr_pixels + 2 * quiet_zone_pixels;

    let mut img: ImageBuffer<Luma<u8>, Vec<u8>> =
        ImageBuffer::from_pixel(image_size, image_size, Luma([255u8]));

    for (idx, color) in modules.iter().enumerate() {
        if *color != qrcode::Color::Dark {
            continue;
        }

        let row = (idx / qr_width) as u32;
        let col = (idx % qr_width) as u32;
        let x_start = quiet_zone_pixels + col * PNG_MODULE_SIZE;
        let y_start = quiet_zone_pixels + row * PNG_MODULE_SIZE;

        for dy in 0..PNG_MODULE_SIZE {
            for dx in 0..PNG_MODULE_SIZE {
                img.put_pixel(x_start + dx, y_start + dy, Luma([0u8]));
            }
        }
    }

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;

    Ok(bytes)
}

/// Build the HTML page showing a scannable code for `url`.
pub fn render_qr_page(url: &str) -> anyhow::Result<String> {
    let png = generate_png_qr_bytes(url)?;
    let img_base64 = BASE64.encode(png);
    let url_text = html_escape::encode_text(url);

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>MyCloudX</title></head>
<body style="display:flex;justify-content:center;align-items:center;height:100vh;margin:0;background:#0f2027;color:white;font-family:sans-serif;">
  <div style="text-align:center;background:rgba(255,255,255,0.1);padding:20px;border-radius:20px;">
    <h2>Scan to Access MyCloudX</h2>
    <img alt="QR code" src="data:image/png;base64,{img_base64}" style="width:240px;height:240px;margin-top:10px;border-radius:10px;background:white;padding:10px;">
    <p>{url_text}</p>
  </div>
</body>
</html>
"#
    ))
}
