//! Hitbox demo application
//!
//! Builds hitboxes of every kind, including one traced from a sprite's
//! transparency, then steps a small scene and logs each overlap.
//!
//! Usage: `hitbox_demo [config.toml|config.ron] [sprite.png]`

use std::sync::Arc;

use hitbox_engine::foundation::logging;
use hitbox_engine::foundation::math::constants::TAU;
use hitbox_engine::prelude::*;

const SPRITE_SIZE: u32 = 48;
const TICKS: usize = 60;
const TICK_SECONDS: f32 = 1.0 / 30.0;

/// A named hitbox with a constant velocity
struct Body {
    name: &'static str,
    hitbox: Hitbox,
    velocity: Vec2,
    spin: f32,
}

impl Body {
    fn new(name: &'static str, hitbox: Hitbox, velocity: Vec2) -> Self {
        Self { name, hitbox, velocity, spin: 0.0 }
    }
    
    fn with_spin(mut self, spin: f32) -> Self {
        self.spin = spin;
        self
    }
    
    fn step(&mut self, delta_time: f32) {
        self.hitbox.translate(self.velocity * delta_time);
        self.hitbox.rotation = (self.hitbox.rotation + self.spin * delta_time) % TAU;
    }
}

/// Moving bodies checked pairwise every tick
struct HitboxDemo {
    bodies: Vec<Body>,
}

impl HitboxDemo {
    fn new(config: &HitboxConfig, sprite: &ImageData) -> Self {
        log::info!("Creating hitbox demo...");
        
        let mask = Arc::new(sprite.generate_pixel_mask(config.alpha_threshold));
        log::info!(
            "Sprite mask {}x{} with {} solid pixels",
            mask.width(),
            mask.height(),
            mask.solid_pixel_count()
        );
        
        let mut hull = sprite.generate_hitbox_with(config);
        hull.set_position(120.0, 40.0);
        if let Some(vertices) = hull.world_vertices() {
            log::info!("Sprite hull has {} vertices", vertices.len());
        }
        
        let ship = Hitbox::compound(
            0.0,
            60.0,
            vec![
                (Vec2::new(0.0, 0.0), HitboxShape::circle(8.0)),
                (Vec2::new(-14.0, -3.0), HitboxShape::aabb(6.0, 6.0)),
                (
                    Vec2::new(8.0, 0.0),
                    HitboxShape::polygon(vec![
                        Vec2::new(0.0, -4.0),
                        Vec2::new(10.0, 0.0),
                        Vec2::new(0.0, 4.0),
                    ]),
                ),
            ],
        );
        
        let bodies = vec![
            Body::new("ship", ship, Vec2::new(90.0, 0.0)).with_spin(1.5),
            Body::new("sprite_hull", hull, Vec2::new(-20.0, 10.0)),
            Body::new(
                "sprite_mask",
                Hitbox::pixel_mask(160.0, 100.0, Arc::clone(&mask)),
                Vec2::new(-30.0, -25.0),
            ),
            Body::new(
                "sprite_mask_twin",
                Hitbox::pixel_mask(100.0, 40.0, mask),
                Vec2::new(0.0, 0.0),
            ),
            Body::new("wall", Hitbox::rect(200.0, 0.0, 10.0, 200.0), Vec2::zeros()),
            Body::new("bullet", Hitbox::circle(220.0, 70.0, 2.0), Vec2::new(-150.0, 0.0)),
        ];
        
        Self { bodies }
    }
    
    /// Steps the scene and returns how many contacts were seen
    fn run(&mut self, ticks: usize) -> usize {
        let mut total_contacts = 0;
        
        for tick in 0..ticks {
            for body in &mut self.bodies {
                body.step(TICK_SECONDS);
            }
            
            for (i, a) in self.bodies.iter().enumerate() {
                for b in &self.bodies[i + 1..] {
                    if a.hitbox.collides(&b.hitbox) {
                        total_contacts += 1;
                        log::info!(
                            "tick {:3}: {} ({}) hits {} ({})",
                            tick,
                            a.name,
                            a.hitbox.shape.kind(),
                            b.name,
                            b.hitbox.shape.kind()
                        );
                    }
                }
            }
        }
        
        total_contacts
    }
}

/// Opaque disc with a notch cut out, so the mask and hull differ visibly
fn synthesize_sprite(size: u32) -> Result<ImageData, AssetError> {
    let center = size as f32 / 2.0;
    let radius = center - 2.0;
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    
    for y in 0..size {
        for x in 0..size {
            let offset = Vec2::new(x as f32 + 0.5 - center, y as f32 + 0.5 - center);
            let in_disc = offset.norm() <= radius;
            let in_notch = offset.x > 0.0 && offset.y.abs() < radius * 0.25;
            let alpha = if in_disc && !in_notch { 255 } else { 0 };
            data.extend_from_slice(&[90, 160, 220, alpha]);
        }
    }
    
    ImageData::from_rgba(data, size, size)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_level("info");
    
    log::info!("Starting hitbox demo");
    
    let mut args = std::env::args().skip(1);
    
    let config = match args.next() {
        Some(path) => {
            log::info!("Loading hitbox config from {}", path);
            HitboxConfig::load_from_file(&path)?
        }
        None => HitboxConfig::default(),
    };
    config.validate()?;
    
    let sprite = match args.next() {
        Some(path) => ImageData::from_file(&path)?,
        None => synthesize_sprite(SPRITE_SIZE)?,
    };
    
    let mut demo = HitboxDemo::new(&config, &sprite);
    let contacts = demo.run(TICKS);
    
    log::info!("Demo finished after {} ticks with {} contacts", TICKS, contacts);
    Ok(())
}
