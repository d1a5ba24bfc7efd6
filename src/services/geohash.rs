// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Geohash encoding.
//!
//! Standard base-32 geohash: longitude and latitude intervals are bisected
//! alternately (longitude first), each step contributing one bit, five bits
//! per output character. A coordinate lying exactly on a midpoint falls in
//! the upper half.

use geo::Coord;

/// Precision used for workout route points (~150 m cells).
pub const ROUTE_PRECISION: usize = 7;

const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Encode a coordinate (`x` = longitude, `y` = latitude) to `precision`
/// characters. The caller is responsible for range-checking the coordinate.
pub fn encode(coord: Coord<f64>, precision: usize) -> String {
    let mut lon_range = (-180.0_f64, 180.0_f64);
    let mut lat_range = (-90.0_f64, 90.0_f64);

    let mut hash = String::with_capacity(precision);
    let mut even_bit = true;
    let mut bits = 0u8;
    let mut index = 0usize;

    while hash.len() < precision {
        let (range, value) = if even_bit {
            (&mut lon_range, coord.x)
        } else {
            (&mut lat_range, coord.y)
        };

        let mid = (range.0 + range.1) / 2.0;
        index <<= 1;
        if value >= mid {
            index |= 1;
            range.0 = mid;
        } else {
            range.1 = mid;
        }
        even_bit = !even_bit;

        bits += 1;
        if bits == 5 {
            hash.push(BASE32[index] as char);
            bits = 0;
            index = 0;
        }
    }

    hash
}
