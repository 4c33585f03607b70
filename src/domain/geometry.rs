use geo_types::Point;
use thiserror::Error;

/// WKB 解碼失敗只會讓該列被捨棄，不會中斷整個流程
#[derive(Error, Debug, PartialEq)]
pub enum WkbError {
    #[error("invalid hex encoding: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("unexpected geometry length: expected {expected} bytes, got {actual}")]
    UnexpectedLength { expected: usize, actual: usize },

    #[error("invalid byte order marker: {0:#04x}")]
    InvalidByteOrder(u8),

    #[error("unsupported geometry type: {0:#010x}")]
    UnsupportedType(u32),
}

// byte order (1) + type word (4)
const HEADER_LEN: usize = 5;
const POINT_TYPE: u32 = 1;

// EWKB 旗標位
const EWKB_Z: u32 = 0x8000_0000;
const EWKB_M: u32 = 0x4000_0000;
const EWKB_SRID: u32 = 0x2000_0000;

/// 解析十六進位編碼的 WKB/EWKB 點幾何。
///
/// 接受小端與大端、EWKB 的 SRID/Z/M 旗標與 ISO 的 1001/2001/3001 型別碼；
/// SRID 與 Z/M 座標會被讀掉但不回傳。長度必須與宣告的維度完全一致。
pub fn decode_point(wkb_hex: &str) -> Result<Point<f64>, WkbError> {
    let bytes = hex::decode(wkb_hex.trim())?;

    if bytes.len() < HEADER_LEN {
        return Err(WkbError::UnexpectedLength {
            expected: HEADER_LEN,
            actual: bytes.len(),
        });
    }

    let little_endian = match bytes[0] {
        0 => false,
        1 => true,
        other => return Err(WkbError::InvalidByteOrder(other)),
    };

    let type_word = read_u32(&bytes[1..HEADER_LEN], little_endian);

    let has_srid = type_word & EWKB_SRID != 0;
    let mut has_z = type_word & EWKB_Z != 0;
    let mut has_m = type_word & EWKB_M != 0;

    // ISO 編碼把維度放在型別碼的千位數
    let base_type = type_word & !(EWKB_Z | EWKB_M | EWKB_SRID);
    match base_type / 1000 {
        0 => {}
        1 => has_z = true,
        2 => has_m = true,
        3 => {
            has_z = true;
            has_m = true;
        }
        _ => return Err(WkbError::UnsupportedType(type_word)),
    }

    if base_type % 1000 != POINT_TYPE {
        return Err(WkbError::UnsupportedType(type_word));
    }

    let ordinates = 2 + usize::from(has_z) + usize::from(has_m);
    let expected = HEADER_LEN + if has_srid { 4 } else { 0 } + 8 * ordinates;
    if bytes.len() != expected {
        return Err(WkbError::UnexpectedLength {
            expected,
            actual: bytes.len(),
        });
    }

    let mut offset = HEADER_LEN;
    if has_srid {
        offset += 4;
    }

    let x = read_f64(&bytes[offset..offset + 8], little_endian);
    let y = read_f64(&bytes[offset + 8..offset + 16], little_endian);

    Ok(Point::new(x, y))
}

fn read_u32(bytes: &[u8], little_endian: bool) -> u32 {
    let raw: [u8; 4] = bytes.try_into().unwrap();
    if little_endian {
        u32::from_le_bytes(raw)
    } else {
        u32::from_be_bytes(raw)
    }
}

fn read_f64(bytes: &[u8], little_endian: bool) -> f64 {
    let raw: [u8; 8] = bytes.try_into().unwrap();
    if little_endian {
        f64::from_le_bytes(raw)
    } else {
        f64::from_be_bytes(raw)
    }
}
