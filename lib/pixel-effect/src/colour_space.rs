//! RGB <-> HSB conversions used by the saturation effect.
//!
//! The arithmetic follows the classic AWT hue/saturation/brightness model in
//! single precision, including its `+ 0.5` rounding on the way back to 8-bit
//! channels. The round trip is exact for every 24-bit color, which is what
//! makes a saturation factor of 1.0 a true identity.

/// Convert 8-bit RGB to `[hue, saturation, brightness]`, each in [0.0, 1.0].
pub fn rgb_to_hsb(r: u8, g: u8, b: u8) -> [f32; 3] {
    let cmax = r.max(g).max(b);
    let cmin = r.min(g).min(b);

    let brightness = cmax as f32 / 255.0;
    let saturation = if cmax != 0 {
        (cmax - cmin) as f32 / cmax as f32
    } else {
        0.0
    };

    let hue = if saturation == 0.0 {
        0.0
    } else {
        let delta = (cmax - cmin) as f32;
        let redc = (cmax - r) as f32 / delta;
        let greenc = (cmax - g) as f32 / delta;
        let bluec = (cmax - b) as f32 / delta;

        let mut hue = if r == cmax {
            bluec - greenc
        } else if g == cmax {
            2.0 + redc - bluec
        } else {
            4.0 + greenc - redc
        };

        hue /= 6.0;
        if hue < 0.0 {
            hue += 1.0;
        }
        hue
    };

    [hue, saturation, brightness]
}

/// Convert hue/saturation/brightness (each in [0.0, 1.0], hue wrapping) back
/// to 8-bit RGB.
pub fn hsb_to_rgb(hue: f32, saturation: f32, brightness: f32) -> (u8, u8, u8) {
    if saturation == 0.0 {
        let v = (brightness * 255.0 + 0.5) as u8;
        return (v, v, v);
    }

    let h = (hue - hue.floor()) * 6.0;
    let f = h - h.floor();
    let p = brightness * (1.0 - saturation);
    let q = brightness * (1.0 - saturation * f);
    let t = brightness * (1.0 - saturation * (1.0 - f));

    let (r, g, b) = match h as u32 {
        0 => (brightness, t, p),
        1 => (q, brightness, p),
        2 => (p, brightness, t),
        3 => (p, q, brightness),
        4 => (t, p, brightness),
        _ => (brightness, p, q),
    };

    (
        (r * 255.0 + 0.5) as u8,
        (g * 255.0 + 0.5) as u8,
        (b * 255.0 + 0.5) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_is_exact() {
        // Coarse sweep over the color cube plus the corners.
        let mut values: Vec<u8> = (0u16..=255).step_by(17).map(|v| v as u8).collect();
        values.push(255);

        for &r in &values {
            for &g in &values {
                for &b in &values {
                    let [h, s, v] = rgb_to_hsb(r, g, b);
                    assert_eq!(hsb_to_rgb(h, s, v), (r, g, b), "({r}, {g}, {b})");
                }
            }
        }
    }

    #[test]
    fn test_primary_hues() {
        assert_eq!(rgb_to_hsb(255, 0, 0), [0.0, 1.0, 1.0]);

        let [h, s, v] = rgb_to_hsb(0, 255, 0);
        assert!((h - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!([s, v], [1.0, 1.0]);

        let [h, s, v] = rgb_to_hsb(0, 0, 255);
        assert!((h - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!([s, v], [1.0, 1.0]);
    }

    #[test]
    fn test_gray_has_zero_saturation() {
        for v in [0u8, 1, 85, 128, 254, 255] {
            let [h, s, _] = rgb_to_hsb(v, v, v);
            assert_eq!((h, s), (0.0, 0.0));
        }
    }

    #[test]
    fn test_zero_saturation_yields_gray() {
        let (r, g, b) = hsb_to_rgb(0.37, 0.0, 0.5);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }
}
