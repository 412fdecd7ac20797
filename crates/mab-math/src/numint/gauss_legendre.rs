//! Gauss–Legendre nodes and weights on [-1, 1].
//!
//! Only the non-negative half of each rule is tabulated; rules are symmetric
//! about zero and odd orders carry the zero node first.

pub(crate) const MAX_ORDER: usize = 12;

#[allow(clippy::excessive_precision)]
const HALF_NODES: [&[f64]; MAX_ORDER] = [
    &[0.0],
    &[0.5773502691896257645091488],
    &[0.0, 0.7745966692414833770358531],
    &[0.3399810435848562648026658, 0.8611363115940525752239465],
    &[0.0, 0.5384693101056830910363144, 0.9061798459386639927976269],
    &[
        0.2386191860831969086305017,
        0.6612093864662645136613996,
        0.9324695142031520278123016,
    ],
    &[
        0.0,
        0.4058451513773971669066064,
        0.7415311855993944398638648,
        0.9491079123427585245261897,
    ],
    &[
        0.1834346424956498049394761,
        0.5255324099163289858177390,
        0.7966664774136267395915539,
        0.9602898564975362316835609,
    ],
    &[
        0.0,
        0.3242534234038089290385380,
        0.6133714327005903973087020,
        0.8360311073266357942994298,
        0.9681602395076260898355762,
    ],
    &[
        0.1488743389816312108848260,
        0.4333953941292471907992659,
        0.6794095682990244062343274,
        0.8650633666889845107320967,
        0.9739065285171717200779640,
    ],
    &[
        0.0,
        0.2695431559523449723315320,
        0.5190961292068118159257257,
        0.7301520055740493240934163,
        0.8870625997680952990751578,
        0.9782286581460569928039380,
    ],
    &[
        0.1252334085114689154724414,
        0.3678314989981801937526915,
        0.5873179542866174472967024,
        0.7699026741943046870368938,
        0.9041172563704748566784659,
        0.9815606342467192506905491,
    ],
];

#[allow(clippy::excessive_precision)]
const HALF_WEIGHTS: [&[f64]; MAX_ORDER] = [
    &[2.0],
    &[1.0],
    &[0.8888888888888888888888889, 0.5555555555555555555555556],
    &[0.6521451548625461426269361, 0.3478548451374538573730639],
    &[
        0.5688888888888888888888889,
        0.4786286704993664680412915,
        0.2369268850561890875142640,
    ],
    &[
        0.4679139345726910473898703,
        0.3607615730481386075698335,
        0.1713244923791703450402961,
    ],
    &[
        0.4179591836734693877551020,
        0.3818300505051189449503698,
        0.2797053914892766679014678,
        0.1294849661688696932706114,
    ],
    &[
        0.3626837833783619829651504,
        0.3137066458778872873379622,
        0.2223810344533744705443560,
        0.1012285362903762591525314,
    ],
    &[
        0.3302393550012597631645251,
        0.3123470770400028400686304,
        0.2606106964029354623187429,
        0.1806481606948574040584720,
        0.0812743883615744119718922,
    ],
    &[
        0.2955242247147528701738930,
        0.2692667193099963550912269,
        0.2190863625159820439955349,
        0.1494513491505805931457763,
        0.0666713443086881375935688,
    ],
    &[
        0.2729250867779006307144835,
        0.2628045445102466621806889,
        0.2331937645919904799185237,
        0.1862902109277342514260976,
        0.1255803694649046246346943,
        0.0556685671161736664827537,
    ],
    &[
        0.2491470458134027850005624,
        0.2334925365383548087608499,
        0.2031674267230659217490645,
        0.1600783285433462263346525,
        0.1069393259953184309602547,
        0.0471753363865118271946160,
    ],
];

/// Full (nodes, weights) for an order in `1..=MAX_ORDER`, ascending by node.
pub(crate) fn table(order: usize) -> Option<(Vec<f64>, Vec<f64>)> {
    if order == 0 || order > MAX_ORDER {
        return None;
    }
    let half_x = HALF_NODES[order - 1];
    let half_w = HALF_WEIGHTS[order - 1];
    // Odd orders own a single zero node that must not be mirrored.
    let skip = order % 2;

    let mut nodes = Vec::with_capacity(order);
    let mut weights = Vec::with_capacity(order);
    for (x, w) in half_x.iter().zip(half_w).skip(skip).rev() {
        nodes.push(-x);
        weights.push(*w);
    }
    nodes.extend_from_slice(half_x);
    weights.extend_from_slice(half_w);
    Some((nodes, weights))
}
