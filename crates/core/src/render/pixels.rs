//! Image page rendering.

use std::io::{self, Write};

use crate::options::PageSettings;
use crate::raster::PageImage;

/// Hex characters per output line of pixel data.
const HEX_LINE_WIDTH: usize = 72;

/// Where an image lands on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Points per image pixel, the same on both axes.
    pub scale: f64,
    /// Overhang of the scaled image past the content box on the x axis,
    /// split evenly on both sides. Negative when the image is narrower.
    pub xoff: f64,
    /// Same as `xoff` for the y axis.
    pub yoff: f64,
    pub padding: f64,
}

impl Placement {
    /// Fit an `iwidth` x `iheight` image into the padded page.
    ///
    /// One axis is scaled to match the content box exactly and the other
    /// is centered. With `fill` the image covers the box (the long side
    /// overhangs); without it the whole image fits inside.
    pub fn fit(iwidth: u32, iheight: u32, settings: &PageSettings) -> Self {
        let (iw, ih) = (iwidth.max(1) as f64, iheight.max(1) as f64);
        let (w, h) = (settings.width as f64, settings.height as f64);
        let padding = settings.padding as f64;
        let box_w = (w - 2.0 * padding).max(1.0);
        let box_h = (h - 2.0 * padding).max(1.0);

        let wider = iw / w > ih / h;
        if settings.fill != wider {
            let scale = box_w / iw;
            Self {
                scale,
                xoff: 0.0,
                yoff: (ih * scale - box_h) / 2.0,
                padding,
            }
        } else {
            let scale = box_h / ih;
            Self {
                scale,
                xoff: (iw * scale - box_w) / 2.0,
                yoff: 0.0,
                padding,
            }
        }
    }

    /// Image matrix mapping user space onto image space.
    pub fn matrix(&self) -> [f64; 6] {
        let inv = 1.0 / self.scale;
        [
            inv,
            0.0,
            0.0,
            inv,
            (self.xoff - self.padding) / self.scale,
            (self.yoff - self.padding) / self.scale,
        ]
    }
}

/// Hex-encoded RGB rows, bottom row first, wrapped for output.
///
/// PostScript image space has its origin at the bottom left, so the
/// last decoded row is emitted first.
pub fn hex_rows(image: &PageImage) -> Vec<String> {
    let mut lines = Vec::new();
    let mut row = Vec::with_capacity(image.width() as usize * 3);
    for y in (0..image.height()).rev() {
        row.clear();
        for x in 0..image.width() {
            row.extend_from_slice(&image.rgb(x, y));
        }
        let encoded = hex::encode(&row);
        for chunk in encoded.as_bytes().chunks(HEX_LINE_WIDTH) {
            lines.push(String::from_utf8_lossy(chunk).into_owned());
        }
    }
    lines
}

fn real(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

pub(super) fn write_image_page<W: Write>(
    out: &mut W,
    settings: &PageSettings,
    image: &PageImage,
) -> io::Result<()> {
    let (iwidth, iheight) = (image.width(), image.height());
    if iwidth > 0 && iheight > 0 {
        let m = Placement::fit(iwidth, iheight, settings).matrix();
        writeln!(out, "/rowdata {} string def", iwidth as u64 * 3)?;
        writeln!(
            out,
            "{} {} 8 [{} {} {} {} {} {}]",
            iwidth,
            iheight,
            real(m[0]),
            real(m[1]),
            real(m[2]),
            real(m[3]),
            real(m[4]),
            real(m[5])
        )?;
        writeln!(
            out,
            "{{currentfile rowdata readhexstring pop}} false 3 colorimage"
        )?;
        for line in hex_rows(image) {
            writeln!(out, "{line}")?;
        }
    }
    writeln!(out, "showpage")
}
