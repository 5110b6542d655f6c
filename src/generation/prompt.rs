use crate::camera::CameraParams;

/// Name of the 45° sector the azimuth falls into. Azimuth grows clockwise
/// seen from above, so 90° looks at the subject's own right side.
pub fn describe_azimuth(azimuth: f32) -> &'static str {
    const SECTORS: [&str; 8] = [
        "front view",
        "three-quarter view from the subject's front right",
        "profile of the subject's right side",
        "three-quarter view from the subject's back right",
        "back view",
        "three-quarter view from the subject's back left",
        "profile of the subject's left side",
        "three-quarter view from the subject's front left",
    ];
    let sector = ((azimuth.rem_euclid(360.0) + 22.5) / 45.0).floor() as usize % SECTORS.len();
    SECTORS[sector]
}

pub fn describe_elevation(elevation: f32) -> &'static str {
    if elevation < -30.0 {
        "worm's-eye view looking up at the subject"
    } else if elevation < -10.0 {
        "low angle shot"
    } else if elevation <= 10.0 {
        "eye level shot"
    } else if elevation <= 45.0 {
        "high angle shot"
    } else {
        "bird's-eye view looking down at the subject"
    }
}

pub fn describe_distance(distance: f32) -> &'static str {
    if distance < 0.8 {
        "close-up"
    } else if distance <= 1.3 {
        "medium shot"
    } else {
        "wide shot"
    }
}

/// Instruction text sent alongside the source photo.
pub fn build_prompt(params: &CameraParams, extra: &str) -> String {
    let mut prompt = format!(
        "Re-photograph the subject of this image from a new camera position: \
         {} (azimuth {:.0}°), {} (elevation {:.0}°), {} (distance {:.2}x the original framing). \
         Keep the subject's identity, proportions, clothing, lighting and surroundings consistent \
         with the original photo; only the viewpoint changes.",
        describe_azimuth(params.azimuth),
        params.azimuth,
        describe_elevation(params.elevation),
        params.elevation,
        describe_distance(params.distance),
        params.distance,
    );
    let extra = extra.trim();
    if !extra.is_empty() {
        prompt.push_str("\nAdditional instructions: ");
        prompt.push_str(extra);
    }
    prompt
}
