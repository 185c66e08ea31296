//! The two fixed shader stages driving the lightning effect.
//!
//! Both are compile-time constants; nothing about them is configurable at
//! runtime beyond the values in the `LightningParams` uniform block, whose
//! std140 layout is mirrored by [`crate::uniforms::LightningUniforms`].

/// Identity passthrough of a 2D quad position into clip space.
pub const VERTEX_SHADER_GLSL: &str = r"#version 450

layout(location = 0) in vec2 aPosition;

void main() {
    gl_Position = vec4(aPosition, 0.0, 1.0);
}
";

/// Fractal-noise lightning field colorized through an HSV transform.
///
/// `gl_FragCoord` has a top-left origin under Vulkan conventions, so the
/// coordinate is remapped to the bottom-left origin the effect was authored
/// against before anything else happens.
pub const FRAGMENT_SHADER_GLSL: &str = r"#version 450

layout(location = 0) out vec4 outColor;

layout(std140, set = 0, binding = 0) uniform LightningParams {
    vec2 iResolution;
    float iTime;
    float uHue;
    float uXOffset;
    float uSpeed;
    float uIntensity;
    float uSize;
} ubo;

#define OCTAVE_COUNT 10

vec3 hsv2rgb(vec3 c) {
    vec3 rgb = clamp(abs(mod(c.x * 6.0 + vec3(0.0, 4.0, 2.0), 6.0) - 3.0) - 1.0, 0.0, 1.0);
    return c.z * mix(vec3(1.0), rgb, c.y);
}

float hash11(float p) {
    p = fract(p * .1031);
    p *= p + 33.33;
    p *= p + p;
    return fract(p);
}

float hash12(vec2 p) {
    vec3 p3 = fract(vec3(p.xyx) * .1031);
    p3 += dot(p3, p3.yzx + 33.33);
    return fract((p3.x + p3.y) * p3.z);
}

mat2 rotate2d(float theta) {
    float c = cos(theta);
    float s = sin(theta);
    return mat2(c, -s, s, c);
}

float noise(vec2 p) {
    vec2 ip = floor(p);
    vec2 fp = fract(p);
    float a = hash12(ip);
    float b = hash12(ip + vec2(1.0, 0.0));
    float c = hash12(ip + vec2(0.0, 1.0));
    float d = hash12(ip + vec2(1.0, 1.0));

    vec2 t = smoothstep(0.0, 1.0, fp);
    return mix(mix(a, b, t.x), mix(c, d, t.x), t.y);
}

float fbm(vec2 p) {
    float value = 0.0;
    float amplitude = 0.5;
    for (int i = 0; i < OCTAVE_COUNT; ++i) {
        value += amplitude * noise(p);
        p *= rotate2d(0.45);
        p *= 2.0;
        amplitude *= 0.5;
    }
    return value;
}

void main() {
    vec2 fragCoord = vec2(gl_FragCoord.x, ubo.iResolution.y - gl_FragCoord.y);
    vec2 uv = fragCoord / ubo.iResolution.xy;
    uv = 2.0 * uv - 1.0;
    uv.x *= ubo.iResolution.x / ubo.iResolution.y;
    uv.x += ubo.uXOffset;

    uv += 2.0 * fbm(uv * ubo.uSize + 0.8 * ubo.iTime * ubo.uSpeed) - 1.0;

    float dist = abs(uv.x);
    vec3 baseColor = hsv2rgb(vec3(ubo.uHue / 360.0, 0.7, 0.8));
    vec3 col = baseColor * mix(0.0, 0.07, hash11(ubo.iTime * ubo.uSpeed)) / dist * ubo.uIntensity;
    outColor = vec4(col, 1.0);
}
";
