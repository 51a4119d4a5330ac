//! Value, gradient, simplex and classic Perlin noise.
//!
//! Simplex and Perlin variants follow the widely used Ashima Arts formulation (permutation
//! polynomial modulo 289, no lookup textures), so results agree with the common GLSL ports.
//! Ranges are nominal: simplex and Perlin can overshoot `[-1, 1]` slightly, and callers should
//! not assume a tighter bound than documented on each function.

use crate::expr::{
    Expr, clamp, dot, less_than, max, mix, smoothstep, splat4, step, vec2, vec3, vec4,
};
use crate::library::hash::{hash1, hash2, hash3};

/// `x - floor(x / 289) * 289`
pub fn mod289(x: &Expr) -> Expr {
    x.modulo(289.0)
}

/// Permutation polynomial `((x * 34 + 1) * x) mod 289`.
pub fn permute(x: &Expr) -> Expr {
    mod289(&((x * 34.0 + 1.0) * x))
}

/// First-order Taylor approximation of `1 / sqrt(r)` around 0.7.
pub fn taylor_inv_sqrt(r: &Expr) -> Expr {
    1.792_842_914_001_59 - r * 0.853_734_720_953_14
}

/// Quintic fade `t^3 (t (6t - 15) + 10)`.
pub fn fade(t: &Expr) -> Expr {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// 4D gradient from a scalar permutation value `j` in `[0, 289)`.
///
/// Each of the first three components is one base-7 digit of `j`, taken with integer
/// division so lattice values on exact multiples never round down a digit.
pub fn grad4(j: &Expr) -> Expr {
    let digit = |place: f64| (j / place).floor().modulo(7.0);
    let pxyz = vec3(digit(42.0), digit(7.0), digit(1.0)) / 7.0 - 1.0;
    let pw = 1.5 - dot(pxyz.abs(), [1.0, 1.0, 1.0]);
    let p = pxyz.extend(&pw);
    let s = less_than(&p, 0.0);
    let xyz = p.xyz() + (s.xyz() * 2.0 - 1.0) * s.w();
    xyz.extend(pw)
}

/// Bilinear interpolation of hashed lattice values, smoothed with a cubic fade. Range `[0, 1]`.
pub fn value_noise(p: &Expr) -> Expr {
    let i = p.floor();
    let f = p.fract();
    let u = &f * &f * (3.0 - &f * 2.0);

    let a = hash1(&i);
    let b = hash1(&(&i + [1.0, 0.0]));
    let c = hash1(&(&i + [0.0, 1.0]));
    let d = hash1(&(&i + [1.0, 1.0]));

    mix(mix(a, b, u.x()), mix(c, d, u.x()), u.y())
}

/// 2D gradient noise from hashed lattice gradients. Range about `[-0.7, 0.7]`.
pub fn gradient_noise2(p: &Expr) -> Expr {
    let i = p.floor();
    let f = p.fract();
    let u = &f * &f * (3.0 - &f * 2.0);

    let corner = |offset: [f64; 2]| {
        let g = hash2(&(&i + offset)) * 2.0 - 1.0;
        dot(g, &f - offset)
    };

    mix(
        mix(corner([0.0, 0.0]), corner([1.0, 0.0]), u.x()),
        mix(corner([0.0, 1.0]), corner([1.0, 1.0]), u.x()),
        u.y(),
    )
}

/// 3D gradient noise, trilinear over hashed gradients with smoothstep weights. Range about
/// `[-1, 1]`.
pub fn gradient_noise3(p: &Expr) -> Expr {
    let i = p.floor();
    let f = p.fract();
    let u = smoothstep(0.0, 1.0, &f);

    let corner = |offset: [f64; 3]| dot(hash3(&(&i + offset)), &f - offset);

    let x00 = mix(corner([0.0, 0.0, 0.0]), corner([1.0, 0.0, 0.0]), u.x());
    let x10 = mix(corner([0.0, 1.0, 0.0]), corner([1.0, 1.0, 0.0]), u.x());
    let x01 = mix(corner([0.0, 0.0, 1.0]), corner([1.0, 0.0, 1.0]), u.x());
    let x11 = mix(corner([0.0, 1.0, 1.0]), corner([1.0, 1.0, 1.0]), u.x());
    mix(mix(x00, x10, u.y()), mix(x01, x11, u.y()), u.z())
}

/// 2D simplex noise. Range about `[-1, 1]`.
pub fn simplex2(v: &Expr) -> Expr {
    const C: [f64; 4] = [
        0.211_324_865_405_187,
        0.366_025_403_784_439,
        -0.577_350_269_189_626,
        0.024_390_243_902_439,
    ];

    let i = (v + dot(v, [C[1], C[1]])).floor();
    let x0 = v - &i + dot(&i, [C[0], C[0]]);

    let i1x = step(x0.y(), x0.x());
    let i1 = vec2(&i1x, i1x.one_minus());

    let x12 = x0.swizzle("xyxy") + [C[0], C[0], C[2], C[2]];
    let x12 = (x12.xy() - &i1).extend(x12.swizzle("zw"));

    let i = mod289(&i);
    let p = permute(
        &(permute(&(i.y() + vec3(0.0, i1.y(), 1.0))) + i.x() + vec3(0.0, i1.x(), 1.0)),
    );

    let m = max(
        0.5 - vec3(
            dot(&x0, &x0),
            dot(x12.xy(), x12.xy()),
            dot(x12.swizzle("zw"), x12.swizzle("zw")),
        ),
        0.0,
    );
    let m = &m * &m;
    let m = &m * &m;

    let x = (&p / 41.0).fract() * 2.0 - 1.0;
    let h = x.abs() - 0.5;
    let ox = (&x + 0.5).floor();
    let a0 = x - ox;

    let m = m * taylor_inv_sqrt(&(&a0 * &a0 + &h * &h));

    let gx = a0.x() * x0.x() + h.x() * x0.y();
    let gyz = a0.swizzle("yz") * x12.swizzle("xz") + h.swizzle("yz") * x12.swizzle("yw");
    let g = gx.extend(gyz);

    dot(m, g) * 130.0
}

/// 3D simplex noise. Range about `[-1, 1]`.
pub fn simplex3(v: &Expr) -> Expr {
    const CX: f64 = 1.0 / 6.0;
    const CY: f64 = 1.0 / 3.0;

    let i = (v + dot(v, [CY, CY, CY])).floor();
    let x0 = v - &i + dot(&i, [CX, CX, CX]);

    let g = step(x0.swizzle("yzx"), &x0);
    let l = g.one_minus();
    let i1 = g.min(l.swizzle("zxy"));
    let i2 = g.max(l.swizzle("zxy"));

    let x1 = &x0 - &i1 + CX;
    let x2 = &x0 - &i2 + CY;
    let x3 = &x0 - 0.5;

    let i = mod289(&i);
    let p = permute(
        &(permute(
            &(permute(&(i.z() + vec4(0.0, i1.z(), i2.z(), 1.0))) + i.y()
                + vec4(0.0, i1.y(), i2.y(), 1.0)),
        ) + i.x()
            + vec4(0.0, i1.x(), i2.x(), 1.0)),
    );

    // ns = (2/7, 0.5/7 - 1, 1/7)
    let n_ = 1.0 / 7.0;
    let ns = [2.0 * n_, 0.5 * n_ - 1.0, n_];

    // lattice digits use division: p * (1/49) lands just under k on multiples of 49
    let j = p.modulo(49.0);
    let x_ = (&j / 7.0).floor();
    let y_ = (&j - &x_ * 7.0).floor();

    let x = x_ * ns[0] + ns[1];
    let y = y_ * ns[0] + ns[1];
    let h = 1.0 - x.abs() - y.abs();

    let b0 = vec4(x.x(), x.y(), y.x(), y.y());
    let b1 = vec4(x.z(), x.w(), y.z(), y.w());

    let s0 = b0.floor() * 2.0 + 1.0;
    let s1 = b1.floor() * 2.0 + 1.0;
    let sh = -step(&h, splat4(0.0));

    let a0 = b0.swizzle("xzyw") + s0.swizzle("xzyw") * sh.swizzle("xxyy");
    let a1 = b1.swizzle("xzyw") + s1.swizzle("xzyw") * sh.swizzle("zzww");

    let p0 = a0.xy().extend(h.x());
    let p1 = a0.swizzle("zw").extend(h.y());
    let p2 = a1.xy().extend(h.z());
    let p3 = a1.swizzle("zw").extend(h.w());

    let norm = taylor_inv_sqrt(&vec4(
        dot(&p0, &p0),
        dot(&p1, &p1),
        dot(&p2, &p2),
        dot(&p3, &p3),
    ));
    let p0 = p0 * norm.x();
    let p1 = p1 * norm.y();
    let p2 = p2 * norm.z();
    let p3 = p3 * norm.w();

    let m = max(
        0.6 - vec4(
            dot(&x0, &x0),
            dot(&x1, &x1),
            dot(&x2, &x2),
            dot(&x3, &x3),
        ),
        0.0,
    );
    let m = &m * &m;
    dot(
        &m * &m,
        vec4(dot(p0, x0), dot(p1, x1), dot(p2, x2), dot(p3, x3)),
    ) * 42.0
}

/// 4D simplex noise. Range about `[-1, 1]`.
pub fn simplex4(v: &Expr) -> Expr {
    const C: [f64; 4] = [
        0.138_196_601_125_011,
        0.276_393_202_250_021,
        0.414_589_803_375_032,
        -0.447_213_595_499_958,
    ];
    const F4: f64 = 0.309_016_994_374_947_45;

    let i = (v + dot(v, [F4, F4, F4, F4])).floor();
    let x0 = v - &i + dot(&i, [C[0], C[0], C[0], C[0]]);

    let is_x = step(x0.swizzle("yzw"), x0.swizzle("xxx"));
    let is_yz = step(x0.swizzle("zww"), x0.swizzle("yyz"));

    let i0x = is_x.x() + is_x.y() + is_x.z();
    let i0yzw = is_x.one_minus();
    let i0y = i0yzw.x() + is_yz.x() + is_yz.y();
    let i0z = i0yzw.y() + is_yz.x().one_minus() + is_yz.z();
    let i0w = i0yzw.z() + is_yz.y().one_minus() + is_yz.z().one_minus();
    let i0 = vec4(i0x, i0y, i0z, i0w);

    let i3 = clamp(&i0, 0.0, 1.0);
    let i2 = clamp(&i0 - 1.0, 0.0, 1.0);
    let i1 = clamp(&i0 - 2.0, 0.0, 1.0);

    let x1 = &x0 - &i1 + C[0];
    let x2 = &x0 - &i2 + C[1];
    let x3 = &x0 - &i3 + C[2];
    let x4 = &x0 + C[3];

    let i = mod289(&i);
    let j0 = permute(&(permute(&(permute(&(permute(&i.w()) + i.z())) + i.y())) + i.x()));
    let lane = |k: fn(&Expr) -> Expr| vec4(k(&i1), k(&i2), k(&i3), 1.0);
    let j1 = permute(
        &(permute(
            &(permute(
                &(permute(&(i.w() + lane(Expr::w))) + i.z() + lane(Expr::z)),
            ) + i.y()
                + lane(Expr::y)),
        ) + i.x()
            + lane(Expr::x)),
    );

    let p0 = grad4(&j0);
    let p1 = grad4(&j1.x());
    let p2 = grad4(&j1.y());
    let p3 = grad4(&j1.z());
    let p4 = grad4(&j1.w());

    let norm = taylor_inv_sqrt(&vec4(
        dot(&p0, &p0),
        dot(&p1, &p1),
        dot(&p2, &p2),
        dot(&p3, &p3),
    ));
    let p0 = p0 * norm.x();
    let p1 = p1 * norm.y();
    let p2 = p2 * norm.z();
    let p3 = p3 * norm.w();
    let p4 = &p4 * taylor_inv_sqrt(&dot(&p4, &p4));

    let m0 = max(
        0.6 - vec3(dot(&x0, &x0), dot(&x1, &x1), dot(&x2, &x2)),
        0.0,
    );
    let m1 = max(0.6 - vec2(dot(&x3, &x3), dot(&x4, &x4)), 0.0);
    let m0 = &m0 * &m0;
    let m1 = &m1 * &m1;

    let near = dot(
        &m0 * &m0,
        vec3(dot(p0, x0), dot(p1, x1), dot(p2, x2)),
    );
    let far = dot(&m1 * &m1, vec2(dot(p3, x3), dot(p4, x4)));
    (near + far) * 49.0
}

/// Classic 3D Perlin noise. Range about `[-1, 1]`.
pub fn perlin3(p: &Expr) -> Expr {
    let pi0 = p.floor();
    let pi1 = &pi0 + 1.0;
    let pi0 = mod289(&pi0);
    let pi1 = mod289(&pi1);
    let pf0 = p.fract();
    let pf1 = &pf0 - 1.0;

    let ix = vec4(pi0.x(), pi1.x(), pi0.x(), pi1.x());
    let iy = vec4(pi0.y(), pi0.y(), pi1.y(), pi1.y());
    let iz0 = splat4(pi0.z());
    let iz1 = splat4(pi1.z());

    let ixy = permute(&(permute(&ix) + iy));
    let ixy0 = permute(&(&ixy + iz0));
    let ixy1 = permute(&(&ixy + iz1));

    let gradients = |ixy: &Expr| {
        let gx = ixy / 7.0;
        let gy = (gx.floor() / 7.0).fract() - 0.5;
        let gx = gx.fract();
        let gz = 0.5 - gx.abs() - gy.abs();
        let sz = step(&gz, 0.0);
        let gx = &gx - &sz * (step(0.0, &gx) - 0.5);
        let gy = &gy - &sz * (step(0.0, &gy) - 0.5);
        (gx, gy, gz)
    };
    let (gx0, gy0, gz0) = gradients(&ixy0);
    let (gx1, gy1, gz1) = gradients(&ixy1);

    let g000 = vec3(gx0.x(), gy0.x(), gz0.x());
    let g100 = vec3(gx0.y(), gy0.y(), gz0.y());
    let g010 = vec3(gx0.z(), gy0.z(), gz0.z());
    let g110 = vec3(gx0.w(), gy0.w(), gz0.w());
    let g001 = vec3(gx1.x(), gy1.x(), gz1.x());
    let g101 = vec3(gx1.y(), gy1.y(), gz1.y());
    let g011 = vec3(gx1.z(), gy1.z(), gz1.z());
    let g111 = vec3(gx1.w(), gy1.w(), gz1.w());

    let norm0 = taylor_inv_sqrt(&vec4(
        dot(&g000, &g000),
        dot(&g010, &g010),
        dot(&g100, &g100),
        dot(&g110, &g110),
    ));
    let g000 = g000 * norm0.x();
    let g010 = g010 * norm0.y();
    let g100 = g100 * norm0.z();
    let g110 = g110 * norm0.w();

    let norm1 = taylor_inv_sqrt(&vec4(
        dot(&g001, &g001),
        dot(&g011, &g011),
        dot(&g101, &g101),
        dot(&g111, &g111),
    ));
    let g001 = g001 * norm1.x();
    let g011 = g011 * norm1.y();
    let g101 = g101 * norm1.z();
    let g111 = g111 * norm1.w();

    let n000 = dot(g000, &pf0);
    let n100 = dot(g100, vec3(pf1.x(), pf0.y(), pf0.z()));
    let n010 = dot(g010, vec3(pf0.x(), pf1.y(), pf0.z()));
    let n110 = dot(g110, vec3(pf1.x(), pf1.y(), pf0.z()));
    let n001 = dot(g001, vec3(pf0.x(), pf0.y(), pf1.z()));
    let n101 = dot(g101, vec3(pf1.x(), pf0.y(), pf1.z()));
    let n011 = dot(g011, vec3(pf0.x(), pf1.y(), pf1.z()));
    let n111 = dot(g111, &pf1);

    let fade_xyz = fade(&pf0);
    let n_z = mix(
        vec4(n000, n100, n010, n110),
        vec4(n001, n101, n011, n111),
        fade_xyz.z(),
    );
    let n_yz = mix(n_z.xy(), n_z.swizzle("zw"), fade_xyz.y());
    mix(n_yz.x(), n_yz.y(), fade_xyz.x()) * 2.2
}

#[cfg(test)]
#[path = "../../tests/unit/library/noise.rs"]
mod tests;
