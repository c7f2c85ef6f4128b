// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::cmp::Ordering;

// Assumes both vectors are sorted.
pub fn union<T>(a: &[T], b: &[T]) -> Vec<T>
where
    T: Ord + Clone,
{
    let mut c: Vec<T> = Vec::with_capacity(a.len() + b.len());
    let mut ap = 0;
    let mut bp = 0;
    while ap < a.len() && bp < b.len() {
        match a[ap].cmp(&b[bp]) {
            Ordering::Less => {
                c.push(a[ap].clone());
                ap += 1;
            }
            Ordering::Greater => {
                c.push(b[bp].clone());
                bp += 1;
            }
            Ordering::Equal => {
                c.push(a[ap].clone());
                ap += 1;
                bp += 1;
            }
        }
    }
    c.extend_from_slice(&a[ap..]);
    c.extend_from_slice(&b[bp..]);
    c
}

// Items of a that aren't in b. Assumes both vectors are sorted.
pub fn difference<T>(a: &[T], b: &[T]) -> Vec<T>
where
    T: Ord + Clone,
{
    let mut c: Vec<T> = Vec::with_capacity(a.len());
    let mut ap = 0;
    let mut bp = 0;
    while ap < a.len() && bp < b.len() {
        match a[ap].cmp(&b[bp]) {
            Ordering::Less => {
                c.push(a[ap].clone());
                ap += 1;
            }
            Ordering::Greater => bp += 1,
            Ordering::Equal => {
                ap += 1;
                bp += 1;
            }
        }
    }
    c.extend_from_slice(&a[ap..]);
    c
}
