use crate::galaxy::GalaxyParams;
use bevy::prelude::*;
use rand::prelude::*;
use rayon::prelude::*;
use std::f32::consts::TAU;

/// Generated positions and colors, one entry per particle.
///
/// Immutable once produced; regeneration builds a replacement rather than
/// mutating in place.
pub struct PointCloud {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
}

impl PointCloud {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Builds the spiral galaxy cloud from the current parameters.
///
/// Points are assigned to arms by index residue, pulled toward the core by
/// the falloff exponent, twisted by a radius-proportional spin angle and
/// scattered by power-law jitter on all three axes. Colors blend from the
/// inside color at the center to the outside color at the rim.
pub fn generate_galaxy(params: &GalaxyParams) -> PointCloud {
    let (positions, colors) = (0..params.count)
        .into_par_iter()
        .map(|i| {
            let mut rng = rand::rng();
            let radius = sample_radius(params, &mut rng);
            let jitter = [
                signed_jitter(&mut rng, params.random_power),
                signed_jitter(&mut rng, params.random_power),
                signed_jitter(&mut rng, params.random_power),
            ];
            (
                spiral_position(params, i, radius, jitter),
                arm_color(params, radius),
            )
        })
        .unzip();

    PointCloud { positions, colors }
}

/// Distance from the core, biased toward the center by the falloff exponent.
/// Never exceeds the configured radius.
fn sample_radius(params: &GalaxyParams, rng: &mut impl Rng) -> f32 {
    rng.random::<f32>().powf(params.falloff_power) * params.radius.max(0.0)
}

/// Places a point on its arm. Arm membership is the index residue, so the
/// branch structure is stable across regenerations; the twist grows with
/// the distance from the core. Vertical thickness comes purely from jitter.
fn spiral_position(params: &GalaxyParams, index: u32, radius: f32, jitter: [f32; 3]) -> [f32; 3] {
    let branch = (index % params.branch_count) as f32 / params.branch_count as f32;
    let angle = branch * TAU + radius * params.spin;

    [
        angle.cos() * radius + jitter[0],
        jitter[1],
        angle.sin() * radius + jitter[2],
    ]
}

/// Power-law jitter: raising a uniform sample to a large exponent keeps most
/// offsets near zero while leaving rare large excursions for the wisps.
fn signed_jitter(rng: &mut impl Rng, power: f32) -> f32 {
    let magnitude = rng.random::<f32>().powf(power);
    if rng.random_bool(0.5) {
        magnitude
    } else {
        -magnitude
    }
}

/// Inside-to-outside blend by relative distance from the core. A degenerate
/// zero radius maps everything to the inside color instead of dividing by
/// zero.
fn arm_color(params: &GalaxyParams, radius: f32) -> [f32; 3] {
    let mix = if params.radius > 0.0 {
        radius / params.radius
    } else {
        0.0
    };
    [
        lerp(params.inside_color[0], params.outside_color[0], mix),
        lerp(params.inside_color[1], params.outside_color[1], mix),
        lerp(params.inside_color[2], params.outside_color[2], mix),
    ]
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// One-shot backdrop cloud. Every coordinate is drawn independently from
/// `[-0.5, 0.5] * extent`; the whole field shares a single tint.
pub fn generate_starfield(count: u32, extent: f32, tint: [f32; 3]) -> PointCloud {
    let mut rng = rand::rng();

    let positions = (0..count)
        .map(|_| {
            [
                (rng.random::<f32>() - 0.5) * extent,
                (rng.random::<f32>() - 0.5) * extent,
                (rng.random::<f32>() - 0.5) * extent,
            ]
        })
        .collect();

    PointCloud {
        positions,
        colors: vec![tint; count as usize],
    }
}

/// sRGB parameter colors become linear RGBA for the GPU color buffer.
pub fn srgb_to_linear(color: [f32; 3]) -> [f32; 4] {
    let linear = Color::srgb(color[0], color[1], color[2]).to_linear();
    [linear.red, linear.green, linear.blue, 1.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> GalaxyParams {
        GalaxyParams::default()
    }

    #[test]
    fn cloud_has_one_entry_per_particle() {
        for count in [1_000u32, 29_000, 100_000] {
            let cloud = generate_galaxy(&GalaxyParams { count, ..params() });
            assert_eq!(cloud.positions.len(), count as usize);
            assert_eq!(cloud.colors.len(), count as usize);
        }
    }

    #[test]
    fn zero_count_is_an_empty_cloud() {
        let cloud = generate_galaxy(&GalaxyParams { count: 0, ..params() });
        assert!(cloud.is_empty());
    }

    #[test]
    fn sampled_radius_never_exceeds_the_configured_radius() {
        let mut rng = rand::rng();
        for falloff_power in [0.5, 1.0, 1.5, 3.0] {
            let params = GalaxyParams {
                falloff_power,
                ..params()
            };
            for _ in 0..100_000 {
                let radius = sample_radius(&params, &mut rng);
                assert!((0.0..=params.radius).contains(&radius));
            }
        }
    }

    #[test]
    fn jitter_is_bounded_and_signed() {
        let mut rng = rand::rng();
        let (mut positive, mut negative) = (0u32, 0u32);
        for _ in 0..10_000 {
            let offset = signed_jitter(&mut rng, 3.0);
            assert!(offset.abs() <= 1.0);
            if offset >= 0.0 {
                positive += 1;
            } else {
                negative += 1;
            }
        }
        // Both signs occur; an even split is not required.
        assert!(positive > 0 && negative > 0);
    }

    #[test]
    fn colors_lie_between_inside_and_outside() {
        let params = params();
        let cloud = generate_galaxy(&params);
        for color in &cloud.colors {
            for channel in 0..3 {
                let lo = params.inside_color[channel].min(params.outside_color[channel]);
                let hi = params.inside_color[channel].max(params.outside_color[channel]);
                assert!(color[channel] >= lo - 1e-6 && color[channel] <= hi + 1e-6);
            }
        }
    }

    #[test]
    fn four_points_land_one_per_branch() {
        // With zero spin and zero jitter the four points sit exactly on the
        // four evenly spaced branch angles.
        let params = GalaxyParams {
            branch_count: 4,
            radius: 1.0,
            spin: 0.0,
            falloff_power: 1.0,
            ..params()
        };
        for i in 0..4u32 {
            let p = spiral_position(&params, i, 1.0, [0.0; 3]);
            let angle = p[2].atan2(p[0]).rem_euclid(TAU);
            let expected = i as f32 / 4.0 * TAU;
            let diff = (angle - expected).abs().min(TAU - (angle - expected).abs());
            assert!(diff < 1e-4, "point {i} at angle {angle}, expected {expected}");
        }
    }

    #[test]
    fn branch_assignment_is_periodic_in_the_index() {
        // Regenerating with identical parameters reuses the same index
        // residues, so arm membership repeats every branch_count indices.
        let params = params();
        for i in 0..16u32 {
            let a = spiral_position(&params, i, 2.0, [0.0; 3]);
            let b = spiral_position(&params, i + params.branch_count, 2.0, [0.0; 3]);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn regenerating_with_identical_parameters_keeps_the_shape() {
        let params = GalaxyParams { count: 1_000, ..params() };
        let first = generate_galaxy(&params);
        let second = generate_galaxy(&params);
        assert_eq!(first.len(), second.len());
        assert_eq!(first.colors.len(), second.colors.len());
    }

    #[test]
    fn tight_radius_and_steep_falloff_stay_finite() {
        let cloud = generate_galaxy(&GalaxyParams {
            count: 10_000,
            radius: 0.5,
            falloff_power: 3.0,
            ..params()
        });
        for p in &cloud.positions {
            assert!(p.iter().all(|c| c.is_finite()));
        }
    }

    #[test]
    fn zero_radius_uses_the_center_color_everywhere() {
        let params = GalaxyParams {
            count: 100,
            radius: 0.0,
            ..params()
        };
        let cloud = generate_galaxy(&params);
        for c in &cloud.colors {
            assert_eq!(*c, params.inside_color);
        }
        // Positions collapse to pure jitter around the origin.
        for p in &cloud.positions {
            assert!(p[0].abs() <= 1.0 && p[1].abs() <= 1.0 && p[2].abs() <= 1.0);
        }
    }

    #[test]
    fn starfield_fills_the_extent_with_a_single_tint() {
        let tint = [0.9, 0.9, 1.0];
        let cloud = generate_starfield(2_000, 100.0, tint);
        assert_eq!(cloud.len(), 2_000);
        for p in &cloud.positions {
            assert!(p.iter().all(|c| c.abs() <= 50.0));
        }
        assert!(cloud.colors.iter().all(|c| *c == tint));
    }
}
