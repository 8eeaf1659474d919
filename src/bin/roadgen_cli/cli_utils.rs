use roadgen::errors::{RoadError, RoadResult};
use roadgen::roads::Settlement;
use roadgen::terrain::GridPos;

/// Generic parser for delimited strings that return fixed-size arrays
pub fn parse_delimited<T, const N: usize>(
    input: &str,
    delimiter: char,
    type_name: &str,
    parser: impl Fn(&str) -> Result<T, std::num::ParseIntError>,
) -> RoadResult<[T; N]>
where
    T: Copy + Default,
{
    let parts: Vec<&str> = input.split(delimiter).collect();
    if parts.len() != N {
        return Err(RoadError::InvalidArgument {
            reason: format!(
                "Invalid {type_name} format '{input}'. Expected {N} {delimiter}-separated values"
            ),
        });
    }

    let mut result = [T::default(); N];
    for (i, part) in parts.iter().enumerate() {
        result[i] = parser(part.trim()).map_err(|_| RoadError::InvalidArgument {
            reason: format!("Invalid {type_name} value: '{part}'"),
        })?;
    }

    Ok(result)
}

/// Parse size string "WIDTHxHEIGHT" with validation
pub fn parse_size(size_str: &str) -> RoadResult<(u32, u32)> {
    let [width, height] = parse_delimited::<u32, 2>(size_str, 'x', "size", |s| s.parse())?;

    if width < 3 || height < 3 {
        return Err(RoadError::InvalidArgument {
            reason: "Width and height must be at least 3".to_string(),
        });
    }

    if width > 4096 || height > 4096 {
        return Err(RoadError::InvalidArgument {
            reason: "Width and height must not exceed 4096".to_string(),
        });
    }

    Ok((width, height))
}

/// Parse a settlement spec "NAME@X,Y" or "NAME@X,Y:HALF_SIZE" (half size defaults to 1)
pub fn parse_settlement(id: u32, spec: &str) -> RoadResult<Settlement> {
    let (name, rest) = spec.split_once('@').ok_or_else(|| RoadError::InvalidArgument {
        reason: format!("Invalid settlement '{spec}'. Expected NAME@X,Y[:SIZE]"),
    })?;

    let (coords, half_size) = match rest.split_once(':') {
        Some((coords, size)) => {
            let size = size.trim().parse::<i32>().map_err(|_| RoadError::InvalidArgument {
                reason: format!("Invalid settlement size: '{size}'"),
            })?;
            (coords, size)
        }
        None => (rest, 1),
    };

    let [x, y] = parse_delimited::<i32, 2>(coords, ',', "position", |s| s.parse())?;
    Settlement::new(id, name.trim(), GridPos::new(x, y), half_size)
}

/// Which settlement pairs to connect
pub fn connection_pairs(count: usize, all_pairs: bool) -> Vec<(usize, usize)> {
    if all_pairs {
        (0..count)
            .flat_map(|i| ((i + 1)..count).map(move |j| (i, j)))
            .collect()
    } else {
        (1..count).map(|i| (i - 1, i)).collect()
    }
}
