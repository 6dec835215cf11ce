use ndarray::ArrayView1;
use num_traits::Float;

#[macro_export]
/// Compensated summation over an iterator, binding one `f64` total per accumulator.
///
/// Tour and tree lengths add up many edges of similar magnitude, so the
/// Kahan-Babuska-Neumaier variant is used to keep the rounding error independent of `n`.
///
/// <https://en.wikipedia.org/wiki/Kahan_summation_algorithm#Further_enhancements>
macro_rules! kbn_summation {
    (for $pat: pat in $expr: expr => {
        $($var: ident += $var_expr: expr;)+
    }) => {
        let ($($var,)+) = {
            use paste::paste;
            paste! {
                $(
                    let mut $var: f64 = 0.;
                    let mut [<$var _compensation>]: f64 = 0.;
                )+
                for $pat in $expr {
                    $(
                        let input: f64 = $var_expr;
                        let t = $var + input;
                        [<$var _compensation>] += if $var.abs() >= input.abs() {
                            ($var - t) + input
                        } else {
                            (input - t) + $var
                        };
                        $var = t;
                    )+
                }
                ($($var + [<$var _compensation>],)+)
            }
        };
    };
}

pub fn euclidean_distance<T: Float>(a: ArrayView1<T>, b: ArrayView1<T>) -> T {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (*x - *y) * (*x - *y))
        .fold(T::zero(), |acc, x| acc + x)
        .sqrt()
}

pub fn manhattan_distance<T: Float>(a: ArrayView1<T>, b: ArrayView1<T>) -> T {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (*x - *y).abs())
        .fold(T::zero(), |acc, x| acc + x)
}
