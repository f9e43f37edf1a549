//! IEEE 754 binary16 conversion.
//!
//! The encoder narrows a single-precision value with round-to-nearest,
//! preserving the sign and NaN-ness. The decoder widens to double precision;
//! every binary16 value is exactly representable there.

/// 2^n for `n` within the normal f64 exponent range.
fn exp2i(n: i32) -> f64 {
    debug_assert!((-1022..=1023).contains(&n));
    f64::from_bits(((n + 1023) as u64) << 52)
}

/// Narrow `x` to its binary16 bit pattern.
pub(crate) fn encode(x: f32) -> u16 {
    let i = x.to_bits();

    let mut bits = ((i >> 16) & 0x8000) as u16;
    // Keep one extra mantissa bit for rounding.
    let m = ((i >> 12) & 0x07ff) as u16;
    let e = (i >> 23) & 0xff;

    // Zero, or a value whose exponent underflows past the smallest
    // half denormal: signed zero.
    if e < 103 {
        return bits;
    }

    // Infinity or exponent overflow: signed infinity. A single NaN must stay
    // a NaN, so carry at least one mantissa bit over.
    if e > 142 {
        bits |= 0x7c00;
        bits |= u16::from(e == 255 && (i & 0x007f_ffff) != 0);
        return bits;
    }

    // Moderate underflow: half denormal, rounded half-up. The rounding add
    // may carry into the exponent field, which yields the correct smallest
    // normal.
    if e < 113 {
        let m = m | 0x0800;
        bits |= (m >> (114 - e)) + ((m >> (113 - e)) & 1);
        return bits;
    }

    bits |= (((e - 112) as u16) << 10) | (m >> 1);
    // Round to nearest; an overflow increments the exponent, which is fine.
    bits += m & 1;
    bits
}

/// Widen the binary16 bit pattern `h` to an f64.
pub(crate) fn decode(h: u16) -> f64 {
    let exp = (h >> 10) & 0x1f;
    let mant = f64::from(h & 0x03ff);

    let val = if exp == 0 {
        // Zero and denormals share one expression: mant * 2^-24.
        mant * exp2i(-24)
    } else if exp != 31 {
        (mant + 1024.0) * exp2i(i32::from(exp) - 25)
    } else if h & 0x03ff == 0 {
        f64::INFINITY
    } else {
        f64::NAN
    };

    if h & 0x8000 != 0 {
        -val
    } else {
        val
    }
}
